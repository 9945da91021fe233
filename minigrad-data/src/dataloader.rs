// dataloader.rs
//! # DataLoader
//!
//! Groups the examples of a [`Dataset`] into `[batch, features]` tensors plus
//! their labels, in the order chosen by a [`Sampler`].
//!
//! ```rust
//! use minigrad_data::{DataLoader, Dataset, LabeledDataset, SequentialSampler};
//!
//! let dataset = LabeledDataset::new(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0], vec![0, 1, 0], 2, 2)?;
//! let loader = DataLoader::new(dataset, 2, SequentialSampler::new(), false)?;
//! let shapes: Vec<Vec<usize>> = loader
//!     .iter()
//!     .map(|batch| batch.map(|(inputs, _)| inputs.shape()))
//!     .collect::<Result<_, _>>()?;
//! assert_eq!(shapes, vec![vec![2, 2], vec![1, 2]]);
//! # Ok::<(), minigrad_core::MinigradError>(())
//! ```

use crate::datasets::{Dataset, Example};
use crate::samplers::{RandomSampler, Sampler, SequentialSampler};
use minigrad_core::train::{Batch, TrainingConfig};
use minigrad_core::{MinigradError, Tensor};

/// Batching loader over a dataset of [`Example`]s.
///
/// # Type parameters
/// - `D`: the dataset.
/// - `S`: the sampler producing each epoch's index order.
#[derive(Debug)]
pub struct DataLoader<D, S = Box<dyn Sampler>> {
    dataset: D,
    batch_size: usize,
    sampler: S,
    drop_last: bool,
}

impl<D, S> DataLoader<D, S>
where
    D: Dataset<Item = Example>,
    S: Sampler,
{
    /// # Errors
    /// `InvalidConfig` if `batch_size` is zero.
    pub fn new(dataset: D, batch_size: usize, sampler: S, drop_last: bool) -> Result<Self, MinigradError> {
        if batch_size == 0 {
            return Err(MinigradError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(DataLoader {
            dataset,
            batch_size,
            sampler,
            drop_last,
        })
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of batches one epoch yields.
    pub fn num_batches(&self) -> usize {
        let samples = self.sampler.len(self.dataset.len());
        if self.drop_last {
            samples / self.batch_size
        } else {
            samples.div_ceil(self.batch_size)
        }
    }

    /// Starts a new epoch.
    pub fn iter(&self) -> Batches<'_, D> {
        Batches {
            dataset: &self.dataset,
            indices: self.sampler.iter(self.dataset.len()),
            batch_size: self.batch_size,
            drop_last: self.drop_last,
        }
    }
}

impl<D> DataLoader<D, Box<dyn Sampler>>
where
    D: Dataset<Item = Example>,
{
    /// Loader with the configured batch size; shuffled (seeded when
    /// `config.seed` is set) when `config.shuffle` is on, sequential otherwise.
    pub fn from_config(dataset: D, config: &TrainingConfig) -> Result<Self, MinigradError> {
        config.validate()?;
        let sampler: Box<dyn Sampler> = match (config.shuffle, config.seed) {
            (true, Some(seed)) => Box::new(RandomSampler::with_seed(seed)),
            (true, None) => Box::new(RandomSampler::new()),
            (false, _) => Box::new(SequentialSampler::new()),
        };
        Self::new(dataset, config.batch_size, sampler, false)
    }
}

impl<'a, D, S> IntoIterator for &'a DataLoader<D, S>
where
    D: Dataset<Item = Example>,
    S: Sampler,
{
    type Item = Result<Batch, MinigradError>;
    type IntoIter = Batches<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One epoch of batches; see [`DataLoader::iter`].
pub struct Batches<'a, D> {
    dataset: &'a D,
    indices: Box<dyn Iterator<Item = usize> + Send + Sync>,
    batch_size: usize,
    drop_last: bool,
}

/// Stacks equally wide examples into a `[n, width]` tensor and a label vector.
fn collate(examples: Vec<Example>) -> Result<Batch, MinigradError> {
    let width = examples.first().map_or(0, |(features, _)| features.len());
    let mut flat = Vec::with_capacity(examples.len() * width);
    let mut labels = Vec::with_capacity(examples.len());
    for (features, label) in &examples {
        if features.len() != width {
            return Err(MinigradError::ShapeMismatch {
                expected: vec![width],
                actual: vec![features.len()],
                operation: "collate".to_string(),
            });
        }
        flat.extend_from_slice(features);
        labels.push(*label);
    }
    let inputs = Tensor::new(flat, vec![examples.len(), width])?;
    Ok((inputs, labels))
}

impl<'a, D> Iterator for Batches<'a, D>
where
    D: Dataset<Item = Example>,
{
    type Item = Result<Batch, MinigradError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut examples = Vec::with_capacity(self.batch_size);
        for idx in self.indices.by_ref().take(self.batch_size) {
            match self.dataset.get(idx) {
                Ok(example) => examples.push(example),
                Err(e) => return Some(Err(e)),
            }
        }
        if examples.is_empty() || (self.drop_last && examples.len() < self.batch_size) {
            return None;
        }
        Some(collate(examples))
    }
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
