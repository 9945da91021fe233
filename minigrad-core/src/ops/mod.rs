//! # Tensor Operations Module (`ops`)
//!
//! Operations are grouped into submodules by functionality. Each operation has a
//! forward function named `xxx_op` that validates its inputs, computes the output
//! and, when gradient tracking applies, records an [`Operation`] node on it. The
//! matching `xxx_backward` function holds the local derivative rule and is
//! dispatched from [`Operation::backward`].
//!
//! ## Submodules:
//!
//! - [`activation`]: ReLU, sigmoid, log-softmax.
//! - [`arithmetic`]: elementwise power.
//! - [`linalg`]: the dense linear transform.
//! - [`loss`]: negative log-likelihood.
//! - [`reduction`]: mean; argmax lives here too but is not differentiable.

use crate::autograd::{should_track, Operation};
use crate::error::MinigradError;
use crate::tensor::Tensor;

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod loss;
pub mod reduction;

/// Applies a unary element-wise operation to a tensor.
///
/// Handles output tensor creation and autograd setup. `backward_builder`
/// receives the input and output values as they were at forward time and
/// returns the node's variant; it is only invoked when a node is recorded.
pub(crate) fn apply_unary_op<F, B>(
    input: &Tensor,
    op: F,
    backward_builder: B,
) -> Result<Tensor, MinigradError>
where
    F: Fn(f64) -> f64,
    B: FnOnce(&[f64], &[f64]) -> Operation,
{
    let (input_values, shape) = {
        let guard = input.read_data();
        (guard.data.clone(), guard.shape.clone())
    };
    let output_values: Vec<f64> = input_values.iter().map(|&v| op(v)).collect();

    let grad_op = should_track(&[input]).then(|| backward_builder(&input_values, &output_values));
    let output = Tensor::new(output_values, shape)?;
    if let Some(grad_op) = grad_op {
        output.attach_node(grad_op, vec![input.clone()]);
    }

    Ok(output)
}

/// Splits `shape` around `axis` into `(outer, axis_len, inner)` so that element
/// `(o, c, i)` sits at flat index `(o * axis_len + c) * inner + i`.
pub(crate) fn axis_layout(shape: &[usize], axis: usize) -> Result<(usize, usize, usize), MinigradError> {
    if axis >= shape.len() {
        return Err(MinigradError::InvalidAxis {
            axis,
            rank: shape.len(),
        });
    }
    let outer = shape[..axis].iter().product();
    let inner = shape[axis + 1..].iter().product();
    Ok((outer, shape[axis], inner))
}
