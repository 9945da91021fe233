//! Data loading for minigrad: in-memory labelled datasets, samplers and a
//! batching [`DataLoader`] whose epochs feed `minigrad_core::train`.

pub mod dataloader;
pub mod datasets;
pub mod samplers;

pub use dataloader::{Batches, DataLoader};
pub use datasets::{Dataset, Example, LabeledDataset};
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
