// minigrad-data/src/dataloader_test.rs

use super::*;
use crate::datasets::LabeledDataset;
use approx::assert_relative_eq;
use minigrad_core::model::Sequential;
use minigrad_core::nn::{Linear, LogSoftmax};
use minigrad_core::optim::SgdOptimizer;
use minigrad_core::train::{train_one_epoch, train_step};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// `n` 2-feature examples; row `i` is `[i, -i]` with label `i % 2`.
fn create_dataset(n: usize) -> LabeledDataset {
    let features = (0..n).flat_map(|i| [i as f64, -(i as f64)]).collect();
    let labels = (0..n).map(|i| i % 2).collect();
    LabeledDataset::new(features, labels, 2, 2).unwrap()
}

fn first_features(batch: &Batch) -> Vec<usize> {
    batch
        .0
        .to_vec()
        .chunks(2)
        .map(|row| row[0] as usize)
        .collect()
}

#[test]
fn test_zero_batch_size_rejected() {
    let result = DataLoader::new(create_dataset(4), 0, SequentialSampler::new(), false);
    assert!(matches!(result, Err(MinigradError::InvalidConfig(_))));
}

#[test]
fn test_sequential_batches_keep_order_and_shape() {
    let loader = DataLoader::new(create_dataset(10), 4, SequentialSampler::new(), false).unwrap();
    assert_eq!(loader.num_batches(), 3);

    let batches: Vec<Batch> = loader.iter().collect::<Result<_, _>>().unwrap();
    assert_eq!(batches.len(), 3);
    assert_eq!(batches[0].0.shape(), vec![4, 2]);
    assert_eq!(batches[2].0.shape(), vec![2, 2]);
    assert_eq!(first_features(&batches[0]), vec![0, 1, 2, 3]);
    assert_eq!(batches[0].1, vec![0, 1, 0, 1]);
    for (got, want) in batches[2].0.to_vec().iter().zip([8.0, -8.0, 9.0, -9.0]) {
        assert_relative_eq!(*got, want);
    }
}

#[test]
fn test_drop_last_skips_partial_batch() {
    let loader = DataLoader::new(create_dataset(10), 4, SequentialSampler::new(), true).unwrap();
    assert_eq!(loader.num_batches(), 2);
    let sizes: Vec<usize> = loader
        .iter()
        .map(|b| b.unwrap().1.len())
        .collect();
    assert_eq!(sizes, vec![4, 4]);
}

#[test]
fn test_shuffled_epoch_covers_every_example_once() {
    let loader = DataLoader::new(create_dataset(23), 5, RandomSampler::with_seed(3), false).unwrap();
    for _ in 0..3 {
        let mut seen: Vec<usize> = loader
            .iter()
            .flat_map(|b| first_features(&b.unwrap()))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..23).collect::<Vec<_>>());
    }
}

#[test]
fn test_labels_follow_their_rows_after_shuffle() {
    let loader = DataLoader::new(create_dataset(12), 5, RandomSampler::with_seed(11), false).unwrap();
    for batch in &loader {
        let batch = batch.unwrap();
        for (row, label) in first_features(&batch).iter().zip(batch.1.iter()) {
            assert_eq!(row % 2, *label);
        }
    }
}

#[test]
fn test_seeded_loaders_reproduce_batches() {
    let a = DataLoader::new(create_dataset(16), 4, RandomSampler::with_seed(42), false).unwrap();
    let b = DataLoader::new(create_dataset(16), 4, RandomSampler::with_seed(42), false).unwrap();
    for _ in 0..2 {
        let from_a: Vec<Vec<usize>> = a.iter().map(|x| first_features(&x.unwrap())).collect();
        let from_b: Vec<Vec<usize>> = b.iter().map(|x| first_features(&x.unwrap())).collect();
        assert_eq!(from_a, from_b);
    }
}

#[test]
fn test_empty_dataset_yields_no_batches() {
    let dataset = LabeledDataset::new(Vec::new(), Vec::new(), 2, 2).unwrap();
    let loader = DataLoader::new(dataset, 3, SequentialSampler::new(), false).unwrap();
    assert_eq!(loader.num_batches(), 0);
    assert_eq!(loader.iter().count(), 0);
}

#[test]
fn test_from_config_uses_batch_size_and_shuffle_flag() {
    let config = TrainingConfig {
        batch_size: 3,
        shuffle: false,
        ..TrainingConfig::default()
    };
    let loader = DataLoader::from_config(create_dataset(7), &config).unwrap();
    assert_eq!(loader.batch_size(), 3);
    let order: Vec<usize> = loader
        .iter()
        .flat_map(|b| first_features(&b.unwrap()))
        .collect();
    assert_eq!(order, (0..7).collect::<Vec<_>>());

    let bad = TrainingConfig {
        batch_size: 0,
        ..TrainingConfig::default()
    };
    assert!(DataLoader::from_config(create_dataset(7), &bad).is_err());
}

#[test]
fn test_loader_epoch_drives_train_one_epoch() {
    let mut rng = StdRng::seed_from_u64(0);
    let model = Sequential::new()
        .with(Linear::with_rng(2, 2, &mut rng).unwrap())
        .with(LogSoftmax::default());
    let mut optimizer = SgdOptimizer::for_module(&model, 0.01).unwrap();
    let loader = DataLoader::new(create_dataset(10), 4, RandomSampler::with_seed(1), false).unwrap();

    let mean_loss = train_one_epoch(&model, &mut optimizer, loader.iter()).unwrap();
    assert!(mean_loss.is_finite());
    assert!(mean_loss > 0.0);
}

#[test]
fn test_epoch_mean_loss_matches_per_batch_steps() {
    let build = || {
        let mut rng = StdRng::seed_from_u64(4);
        Sequential::new()
            .with(Linear::with_rng(2, 2, &mut rng).unwrap())
            .with(LogSoftmax::default())
    };
    let loader = DataLoader::new(create_dataset(9), 4, SequentialSampler::new(), false).unwrap();

    let model = build();
    let mut optimizer = SgdOptimizer::for_module(&model, 0.01).unwrap();
    let mean_loss = train_one_epoch(&model, &mut optimizer, loader.iter()).unwrap();

    let replay = build();
    let mut replay_optimizer = SgdOptimizer::for_module(&replay, 0.01).unwrap();
    let losses: Vec<f64> = loader
        .iter()
        .map(|b| {
            let (inputs, labels) = b.unwrap();
            train_step(&replay, &mut replay_optimizer, &inputs, &labels).unwrap()
        })
        .collect();
    assert_eq!(losses.len(), 3);
    assert_relative_eq!(mean_loss, losses.iter().sum::<f64>() / 3.0, max_relative = 1e-12);
}
