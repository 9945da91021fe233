// minigrad-data/src/datasets/labeled_dataset.rs

use crate::datasets::traits::Dataset;
use minigrad_core::MinigradError;

/// One flattened example and its class label.
pub type Example = (Vec<f64>, usize);

/// In-memory classification data: `len` rows of `feature_count` values stored
/// row-major, one label in `[0, class_count)` per row.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledDataset {
    features: Vec<f64>,
    labels: Vec<usize>,
    feature_count: usize,
    class_count: usize,
}

impl LabeledDataset {
    /// # Errors
    /// * `InvalidShape` if `feature_count` or `class_count` is zero.
    /// * `ShapeMismatch` if `features.len() != labels.len() * feature_count`.
    /// * `LabelOutOfRange` for a label `>= class_count`.
    pub fn new(
        features: Vec<f64>,
        labels: Vec<usize>,
        feature_count: usize,
        class_count: usize,
    ) -> Result<Self, MinigradError> {
        if feature_count == 0 || class_count == 0 {
            return Err(MinigradError::InvalidShape {
                shape: vec![feature_count, class_count],
                operation: "LabeledDataset (feature_count, class_count)".to_string(),
            });
        }
        if features.len() != labels.len() * feature_count {
            return Err(MinigradError::ShapeMismatch {
                expected: vec![labels.len(), feature_count],
                actual: vec![features.len()],
                operation: "LabeledDataset features".to_string(),
            });
        }
        if let Some(&label) = labels.iter().find(|&&l| l >= class_count) {
            return Err(MinigradError::LabelOutOfRange { label, class_count });
        }
        Ok(LabeledDataset {
            features,
            labels,
            feature_count,
            class_count,
        })
    }

    /// Builds a dataset from one row per example; every row must have the same width.
    pub fn from_rows(
        rows: Vec<Vec<f64>>,
        labels: Vec<usize>,
        class_count: usize,
    ) -> Result<Self, MinigradError> {
        let feature_count = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != feature_count) {
            return Err(MinigradError::ShapeMismatch {
                expected: vec![feature_count],
                actual: vec![bad.len()],
                operation: "LabeledDataset row width".to_string(),
            });
        }
        if rows.len() != labels.len() {
            return Err(MinigradError::ShapeMismatch {
                expected: vec![rows.len()],
                actual: vec![labels.len()],
                operation: "LabeledDataset labels".to_string(),
            });
        }
        Self::new(rows.concat(), labels, feature_count, class_count)
    }

    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    pub fn class_count(&self) -> usize {
        self.class_count
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Borrowed features of row `index`.
    pub fn row(&self, index: usize) -> Result<&[f64], MinigradError> {
        if index >= self.labels.len() {
            return Err(MinigradError::IndexOutOfBounds {
                index,
                len: self.labels.len(),
            });
        }
        let start = index * self.feature_count;
        Ok(&self.features[start..start + self.feature_count])
    }

    /// Splits off the first `at` examples; the rest form the second dataset.
    ///
    /// # Errors
    /// `IndexOutOfBounds` if `at > self.len()`.
    pub fn split_at(&self, at: usize) -> Result<(LabeledDataset, LabeledDataset), MinigradError> {
        if at > self.labels.len() {
            return Err(MinigradError::IndexOutOfBounds {
                index: at,
                len: self.labels.len(),
            });
        }
        let cut = at * self.feature_count;
        let part = |features: &[f64], labels: &[usize]| LabeledDataset {
            features: features.to_vec(),
            labels: labels.to_vec(),
            feature_count: self.feature_count,
            class_count: self.class_count,
        };
        Ok((
            part(&self.features[..cut], &self.labels[..at]),
            part(&self.features[cut..], &self.labels[at..]),
        ))
    }
}

impl Dataset for LabeledDataset {
    type Item = Example;

    fn get(&self, index: usize) -> Result<Example, MinigradError> {
        let row = self.row(index)?;
        Ok((row.to_vec(), self.labels[index]))
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}

#[cfg(test)]
#[path = "labeled_dataset_test.rs"]
mod tests;
