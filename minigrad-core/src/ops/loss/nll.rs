use crate::autograd::{should_track, Operation};
use crate::error::MinigradError;
use crate::tensor::Tensor;

/// Negative log-likelihood averaged over the batch.
///
/// `log_probs` is `[N, C]`, `labels` holds `N` class indices in `[0, C)`.
/// Returns the 0-d tensor `−(1/N) Σ_n log_probs[n, labels[n]]`.
///
/// # Errors
/// * `InvalidShape` if `log_probs` is not 2-D.
/// * `ShapeMismatch` if `labels.len() != N`.
/// * `LabelOutOfRange` for a label `>= C`.
pub fn nll_loss_op(log_probs: &Tensor, labels: &[usize]) -> Result<Tensor, MinigradError> {
    let guard = log_probs.read_data();
    if guard.shape.len() != 2 {
        return Err(MinigradError::InvalidShape {
            shape: guard.shape.clone(),
            operation: "nll_loss (expected [batch, classes])".to_string(),
        });
    }
    let (batch, classes) = (guard.shape[0], guard.shape[1]);
    if labels.len() != batch {
        return Err(MinigradError::ShapeMismatch {
            expected: vec![batch],
            actual: vec![labels.len()],
            operation: "nll_loss labels".to_string(),
        });
    }
    if let Some(&label) = labels.iter().find(|&&l| l >= classes) {
        return Err(MinigradError::LabelOutOfRange {
            label,
            class_count: classes,
        });
    }

    let picked: f64 = labels
        .iter()
        .enumerate()
        .map(|(n, &t)| guard.data[n * classes + t])
        .sum();
    drop(guard);

    let output = Tensor::scalar(-picked / batch as f64);
    if should_track(&[log_probs]) {
        output.attach_node(
            Operation::NllLoss {
                labels: labels.to_vec(),
            },
            vec![log_probs.clone()],
        );
    }
    Ok(output)
}

/// `dL[n, t_n] = −g / N`, zero elsewhere.
pub(crate) fn nll_loss_backward(labels: &[usize], shape: &[usize], grad_output: &[f64]) -> Vec<f64> {
    let (batch, classes) = (shape[0], shape[1]);
    let g = grad_output.first().copied().unwrap_or(0.0);
    let mut grad_input = vec![0.0; batch * classes];
    for (n, &t) in labels.iter().enumerate() {
        grad_input[n * classes + t] = -g / batch as f64;
    }
    grad_input
}

#[cfg(test)]
#[path = "nll_test.rs"]
mod tests;
