use crate::autograd::{should_track, Operation};
use crate::error::MinigradError;
use crate::tensor::Tensor;

/// Mean over every element, returned as a 0-d tensor.
pub fn mean_op(input: &Tensor) -> Result<Tensor, MinigradError> {
    let (sum, count) = {
        let guard = input.read_data();
        (guard.data.iter().sum::<f64>(), guard.numel())
    };
    // Shapes never contain a zero dimension, but keep the division honest.
    if count == 0 {
        return Err(MinigradError::EmptyReduction {
            operation: "mean".to_string(),
        });
    }

    let output = Tensor::scalar(sum / count as f64);
    if should_track(&[input]) {
        output.attach_node(Operation::Mean { count }, vec![input.clone()]);
    }
    Ok(output)
}

/// `dx_i = g / n` for every element.
pub(crate) fn mean_backward(count: usize, grad_output: &[f64]) -> Vec<f64> {
    let g = grad_output.first().copied().unwrap_or(0.0);
    vec![g / count as f64; count]
}

#[cfg(test)]
#[path = "mean_test.rs"]
mod tests;
