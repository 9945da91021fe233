use crate::autograd::graph::{reverse_creation_order, NodeId};
use crate::error::MinigradError;
use crate::tensor::Tensor;
use std::collections::HashMap;

/// Computes the gradient of a single-value tensor with respect to every tracked
/// leaf it depends on, adding the result into those leaves' gradient buffers.
///
/// The traversal seeds the output gradient with `1.0` and visits the reachable
/// nodes in reverse creation order. Gradients for non-leaf tensors are kept in a
/// pending map for the duration of the call only; gradients routed to tensors
/// that do not require grad are dropped.
///
/// The graph is left intact, so calling this twice accumulates twice.
///
/// # Errors
/// * `InvalidShape` if `output` holds more than one value.
/// * Any error raised by an operation's backward rule or by accumulation.
pub fn backward(output: &Tensor) -> Result<(), MinigradError> {
    let (requires_grad, grad_fn) = {
        let guard = output.read_data();
        if guard.numel() != 1 {
            return Err(MinigradError::InvalidShape {
                shape: guard.shape.clone(),
                operation: "backward".to_string(),
            });
        }
        (guard.requires_grad, guard.grad_fn.clone())
    };

    if !requires_grad {
        log::debug!("backward() called on a tensor without tracked ancestors. Nothing to do.");
        return Ok(());
    }

    let root = match grad_fn {
        Some(node) => node,
        None => {
            // A tracked leaf differentiated with respect to itself.
            return output.accumulate_grad(&[1.0]);
        }
    };

    let order = reverse_creation_order(&root);
    log::debug!("backward: visiting {} graph nodes", order.len());

    let mut pending: HashMap<NodeId, Vec<f64>> = HashMap::new();
    pending.insert(root.id(), vec![1.0]);

    for node in order {
        let grad_output = match pending.remove(&node.id()) {
            Some(grad) => grad,
            None => continue,
        };

        let input_grads = node.op().backward(node.inputs(), &grad_output)?;

        for (input, grad) in node.inputs().iter().zip(input_grads) {
            let grad = match grad {
                Some(grad) => grad,
                None => continue,
            };
            match input.grad_fn() {
                Some(parent) => {
                    let slot = pending
                        .entry(parent.id())
                        .or_insert_with(|| vec![0.0; grad.len()]);
                    if slot.len() != grad.len() {
                        return Err(MinigradError::ShapeMismatch {
                            expected: vec![slot.len()],
                            actual: vec![grad.len()],
                            operation: format!("{} backward (pending gradient)", node.op().name()),
                        });
                    }
                    for (acc, g) in slot.iter_mut().zip(grad.iter()) {
                        *acc += *g;
                    }
                }
                None => {
                    if input.requires_grad() {
                        input.accumulate_grad(&grad)?;
                    }
                }
            }
        }
    }

    Ok(())
}
