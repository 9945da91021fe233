// minigrad-core/src/nn/losses/nll.rs

use crate::error::MinigradError;
use crate::ops::loss::nll_loss_op;
use crate::tensor::Tensor;

/// Negative log-likelihood loss over `[N, C]` log-probabilities, averaged over
/// the batch.
///
/// Pair it with a [`crate::nn::LogSoftmax`] output layer; together they form the
/// usual cross-entropy loss.
#[derive(Debug, Clone, Default)]
pub struct NLLLoss {}

impl NLLLoss {
    pub fn new() -> Self {
        NLLLoss {}
    }

    /// Scalar loss `−(1/N) Σ_n log_probs[n, labels[n]]`.
    pub fn calculate(&self, log_probs: &Tensor, labels: &[usize]) -> Result<Tensor, MinigradError> {
        nll_loss_op(log_probs, labels)
    }
}

#[cfg(test)]
#[path = "nll_test.rs"]
mod tests;
