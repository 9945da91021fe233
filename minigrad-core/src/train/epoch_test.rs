use super::*;
use crate::autograd::with_no_grad;
use crate::model::Sequential;
use crate::nn::{Linear, LogSoftmax};
use crate::optim::SgdOptimizer;
use crate::utils::testing::create_test_tensor;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Two well-separated classes in 2-D.
fn toy_batch() -> Batch {
    let inputs = create_test_tensor(
        vec![2.0, 1.0, 1.5, 2.0, -2.0, -1.0, -1.0, -2.5],
        vec![4, 2],
    );
    (inputs, vec![0, 0, 1, 1])
}

fn toy_model(seed: u64) -> Sequential {
    Sequential::new()
        .with(Linear::with_rng(2, 2, &mut StdRng::seed_from_u64(seed)).unwrap())
        .with(LogSoftmax::new(1))
}

#[test]
fn test_train_step_decreases_loss() -> Result<(), MinigradError> {
    let model = toy_model(0);
    let mut optimizer = SgdOptimizer::for_module(&model, 0.1)?;
    let (inputs, labels) = toy_batch();

    let before = train_step(&model, &mut optimizer, &inputs, &labels)?;
    let after = nll_loss_op(&model.forward(&inputs)?, &labels)?.item()?;
    assert!(after < before, "loss went from {} to {}", before, after);
    Ok(())
}

#[test]
fn test_train_step_error_leaves_parameters_untouched() -> Result<(), MinigradError> {
    let model = toy_model(1);
    let mut optimizer = SgdOptimizer::for_module(&model, 0.1)?;
    let (inputs, labels) = toy_batch();
    train_step(&model, &mut optimizer, &inputs, &labels)?;

    let snapshot: Vec<(Vec<f64>, Vec<f64>)> = model
        .parameters()
        .iter()
        .map(|p| (p.to_vec(), p.grad().unwrap().to_vec()))
        .collect();

    let err = train_step(&model, &mut optimizer, &inputs, &[0, 0, 1, 7]).unwrap_err();
    assert_eq!(err, MinigradError::LabelOutOfRange { label: 7, class_count: 2 });

    let after: Vec<(Vec<f64>, Vec<f64>)> = model
        .parameters()
        .iter()
        .map(|p| (p.to_vec(), p.grad().unwrap().to_vec()))
        .collect();
    assert_eq!(snapshot, after);
    Ok(())
}

#[test]
fn test_train_step_refuses_to_run_without_grad_mode() -> Result<(), MinigradError> {
    let model = toy_model(4);
    let mut optimizer = SgdOptimizer::for_module(&model, 0.1)?;
    let (inputs, labels) = toy_batch();
    let before: Vec<Vec<f64>> = model.parameters().iter().map(|p| p.to_vec()).collect();

    let err = with_no_grad(|| train_step(&model, &mut optimizer, &inputs, &labels)).unwrap_err();
    assert!(matches!(err, MinigradError::GradientModeDisabled { .. }));
    let err = with_no_grad(|| train_one_epoch(&model, &mut optimizer, vec![toy_batch()])).unwrap_err();
    assert!(matches!(err, MinigradError::GradientModeDisabled { .. }));

    let after: Vec<Vec<f64>> = model.parameters().iter().map(|p| p.to_vec()).collect();
    assert_eq!(before, after);

    // Tracking is back once the scope ends.
    train_step(&model, &mut optimizer, &inputs, &labels)?;
    let trained: Vec<Vec<f64>> = model.parameters().iter().map(|p| p.to_vec()).collect();
    assert_ne!(before, trained);
    Ok(())
}

#[test]
fn test_train_one_epoch_mean_of_batch_losses() -> Result<(), MinigradError> {
    let model = toy_model(2);
    let mut optimizer = SgdOptimizer::for_module(&model, 0.05)?;
    let batches = vec![toy_batch(), toy_batch()];
    let mean = train_one_epoch(&model, &mut optimizer, batches)?;
    assert!(mean.is_finite() && mean > 0.0);
    Ok(())
}

#[test]
fn test_train_one_epoch_empty() {
    let model = toy_model(3);
    let mut optimizer = SgdOptimizer::for_module(&model, 0.05).unwrap();
    let err = train_one_epoch(&model, &mut optimizer, Vec::<Batch>::new()).unwrap_err();
    assert!(matches!(err, MinigradError::EmptyReduction { .. }));
}

#[test]
fn test_train_one_epoch_propagates_batch_errors() {
    let model = toy_model(3);
    let mut optimizer = SgdOptimizer::for_module(&model, 0.05).unwrap();
    let batches: Vec<Result<Batch, MinigradError>> =
        vec![Ok(toy_batch()), Err(MinigradError::IndexOutOfBounds { index: 9, len: 4 })];
    assert_eq!(
        train_one_epoch(&model, &mut optimizer, batches).unwrap_err(),
        MinigradError::IndexOutOfBounds { index: 9, len: 4 }
    );
}

#[test]
fn test_fit_reports_each_epoch_and_learns() -> Result<(), MinigradError> {
    let model = toy_model(4);
    let config = TrainingConfig {
        learning_rate: 0.2,
        epochs: 100,
        batch_size: 4,
        shuffle: false,
        seed: Some(0),
    };
    let mut optimizer = config.sgd_for(&model)?;
    let mut requested = Vec::new();
    let reports = fit(&model, &mut optimizer, &config, |epoch| {
        requested.push(epoch);
        vec![toy_batch()]
    })?;

    assert_eq!(reports.len(), 100);
    assert_eq!(requested, (0..100).collect::<Vec<_>>());
    assert!(reports.iter().all(|r| r.batches == 1));
    assert!(reports[99].mean_loss < reports[0].mean_loss);

    let eval = evaluate(&model, vec![toy_batch()])?;
    assert_eq!(eval.examples, 4);
    assert_eq!(eval.accuracy, 1.0);
    Ok(())
}

#[test]
fn test_fit_rejects_invalid_config() {
    let model = toy_model(5);
    let mut optimizer = SgdOptimizer::for_module(&model, 0.1).unwrap();
    let config = TrainingConfig { epochs: 0, ..Default::default() };
    let result = fit(&model, &mut optimizer, &config, |_| vec![toy_batch()]);
    assert!(matches!(result, Err(MinigradError::InvalidConfig(_))));
}

#[test]
fn test_evaluate_builds_no_graph() -> Result<(), MinigradError> {
    let model = toy_model(6);
    let grads_before: Vec<Vec<f64>> = model
        .parameters()
        .iter()
        .map(|p| p.grad().unwrap().to_vec())
        .collect();

    let report = evaluate(&model, vec![toy_batch(), toy_batch()])?;
    assert_eq!(report.examples, 8);
    assert!((0.0..=1.0).contains(&report.accuracy));
    assert!(crate::autograd::is_grad_enabled());

    let grads_after: Vec<Vec<f64>> = model
        .parameters()
        .iter()
        .map(|p| p.grad().unwrap().to_vec())
        .collect();
    assert_eq!(grads_before, grads_after);
    Ok(())
}

#[test]
fn test_evaluate_matches_direct_loss() -> Result<(), MinigradError> {
    let model = toy_model(7);
    let (inputs, labels) = toy_batch();
    let direct = nll_loss_op(&model.forward(&inputs)?, &labels)?.item()?;
    let report = evaluate(&model, vec![(inputs, labels)])?;
    assert!((report.mean_loss - direct).abs() < 1e-12);
    Ok(())
}
