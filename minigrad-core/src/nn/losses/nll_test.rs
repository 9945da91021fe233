use super::*;
use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_with_grad};
use approx::assert_relative_eq;

/// `softmax(scores) − one_hot(label)` for one row.
fn closed_form(scores: &[f64], label: usize) -> Vec<f64> {
    let total: f64 = scores.iter().map(|s| s.exp()).sum();
    scores
        .iter()
        .enumerate()
        .map(|(c, s)| s.exp() / total - if c == label { 1.0 } else { 0.0 })
        .collect()
}

#[test]
fn test_nll_with_log_softmax_single_example() {
    let scores = create_test_tensor_with_grad(vec![1.0, 2.0, 0.1], vec![1, 3]);
    let loss = NLLLoss::new()
        .calculate(&scores.log_softmax(1).unwrap(), &[1])
        .unwrap();
    assert_relative_eq!(loss.item().unwrap(), 0.417_030_016, epsilon = 1e-8);

    loss.backward().unwrap();
    let grad = scores.grad().unwrap();
    check_tensor_near(&grad, &[1, 3], &closed_form(&[1.0, 2.0, 0.1], 1), 1e-12);
    // The commonly quoted rounding of the same gradient.
    check_tensor_near(&grad, &[1, 3], &[0.245, -0.332, 0.087], 0.015);
}

#[test]
fn test_nll_with_log_softmax_batch_is_divided_by_batch_size() {
    let scores = create_test_tensor_with_grad(vec![1.0, 2.0, 0.1, 0.5, -1.0, 3.0], vec![2, 3]);
    let loss = NLLLoss::new()
        .calculate(&scores.log_softmax(1).unwrap(), &[1, 2])
        .unwrap();
    loss.backward().unwrap();
    let expected: Vec<f64> = closed_form(&[1.0, 2.0, 0.1], 1)
        .into_iter()
        .chain(closed_form(&[0.5, -1.0, 3.0], 2))
        .map(|g| g / 2.0)
        .collect();
    check_tensor_near(&scores.grad().unwrap(), &[2, 3], &expected, 1e-12);
}

#[test]
fn test_nll_loss_is_zero_for_certain_prediction() {
    let log_probs = create_test_tensor(vec![0.0, f64::NEG_INFINITY], vec![1, 2]);
    let loss = NLLLoss::new().calculate(&log_probs, &[0]).unwrap();
    assert_eq!(loss.item().unwrap(), 0.0);
}
