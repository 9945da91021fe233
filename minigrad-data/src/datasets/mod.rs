pub mod labeled_dataset;
pub mod traits;

pub use labeled_dataset::{Example, LabeledDataset};
pub use traits::Dataset;
