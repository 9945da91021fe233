//! Reverse-mode automatic differentiation.
//!
//! Operations on tensors that require grad record a [`graph::Node`] in the
//! output's `grad_fn`. The node names its [`Operation`] variant, keeps handles to
//! its inputs and whatever forward values the local derivative needs.
//! [`backward`] walks those nodes newest-first and accumulates gradients into the
//! tracked leaves.
//!
//! Graph construction can be switched off for a scope with [`no_grad`].

pub mod backward;
pub mod grad_check;
pub mod grad_mode;
pub mod graph;
pub mod operation;

pub use backward::backward;
pub use grad_mode::{is_grad_enabled, no_grad, with_no_grad, NoGradGuard};
pub use operation::Operation;

use crate::error::MinigradError;
use crate::tensor::Tensor;

/// Marks a leaf tensor as requiring gradient accumulation and returns a handle to it.
///
/// A zeroed gradient buffer of the tensor's shape is allocated if none exists.
///
/// # Errors
/// `RequiresGradOnNonLeaf` if `tensor` was produced by an operation.
pub fn track(tensor: &Tensor) -> Result<Tensor, MinigradError> {
    tensor.requires_grad_(true)?;
    Ok(tensor.clone())
}

/// True when an operation over `inputs` has to record a graph node.
pub(crate) fn should_track(inputs: &[&Tensor]) -> bool {
    is_grad_enabled() && inputs.iter().any(|t| t.requires_grad())
}
