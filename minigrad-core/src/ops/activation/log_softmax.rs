use crate::autograd::{should_track, Operation};
use crate::error::MinigradError;
use crate::ops::axis_layout;
use crate::tensor::Tensor;

/// Computes `log(softmax(x))` along `axis`.
///
/// Each lane is shifted by its maximum before exponentiation, so large scores do
/// not overflow. The softmax probabilities are kept on the graph node.
///
/// # Errors
/// `InvalidAxis` if `axis` is not smaller than the tensor's rank.
pub fn log_softmax_op(input: &Tensor, axis: usize) -> Result<Tensor, MinigradError> {
    let (values, shape) = {
        let guard = input.read_data();
        (guard.data.clone(), guard.shape.clone())
    };
    let (outer, dim, inner) = axis_layout(&shape, axis)?;

    let mut log_probs = vec![0.0; values.len()];
    let mut probs = vec![0.0; values.len()];
    for o in 0..outer {
        for i in 0..inner {
            let at = |c: usize| (o * dim + c) * inner + i;
            let max = (0..dim)
                .map(|c| values[at(c)])
                .fold(f64::NEG_INFINITY, f64::max);
            let sum_exp: f64 = (0..dim).map(|c| (values[at(c)] - max).exp()).sum();
            let log_sum = sum_exp.ln();
            for c in 0..dim {
                let lp = values[at(c)] - max - log_sum;
                log_probs[at(c)] = lp;
                probs[at(c)] = lp.exp();
            }
        }
    }

    let output = Tensor::new(log_probs, shape)?;
    if should_track(&[input]) {
        output.attach_node(
            Operation::LogSoftmax {
                axis,
                softmax: probs,
            },
            vec![input.clone()],
        );
    }
    Ok(output)
}

/// `dx = g − softmax(x) · Σ_axis g`, lane by lane.
pub(crate) fn log_softmax_backward(
    softmax: &[f64],
    shape: &[usize],
    axis: usize,
    grad_output: &[f64],
) -> Vec<f64> {
    // The axis was validated in the forward pass.
    let outer: usize = shape[..axis].iter().product();
    let dim = shape[axis];
    let inner: usize = shape[axis + 1..].iter().product();

    let mut grad_input = vec![0.0; grad_output.len()];
    for o in 0..outer {
        for i in 0..inner {
            let at = |c: usize| (o * dim + c) * inner + i;
            let lane_sum: f64 = (0..dim).map(|c| grad_output[at(c)]).sum();
            for c in 0..dim {
                grad_input[at(c)] = grad_output[at(c)] - softmax[at(c)] * lane_sum;
            }
        }
    }
    grad_input
}

#[cfg(test)]
#[path = "log_softmax_test.rs"]
mod tests;
