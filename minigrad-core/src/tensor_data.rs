// src/tensor_data.rs
use crate::autograd::graph::Node;
use crate::error::MinigradError;
use std::sync::Arc;

/// Internal storage and metadata for a Tensor.
///
/// Holds the values, the shape and the autograd-related information.
/// It is wrapped in `Arc<RwLock<TensorData>>` by the `Tensor` struct
/// to allow shared ownership and interior mutability.
#[derive(Debug)]
pub struct TensorData {
    /// Values in row-major order.
    pub(crate) data: Vec<f64>,
    /// The shape (dimensions) of the tensor. Empty for a 0-d scalar.
    pub(crate) shape: Vec<usize>,

    // --- Autograd Metadata ---
    /// If true, operations involving this tensor are recorded in the computation graph.
    pub(crate) requires_grad: bool,
    /// Gradient buffer, same length as `data`.
    /// Only leaf tensors that require grad own one; it starts zeroed and is only
    /// ever added to by backward passes until explicitly reset.
    pub(crate) grad: Option<Vec<f64>>,
    /// Node of the operation that produced this tensor.
    /// Leaf tensors (created directly by the user) have `grad_fn = None`.
    pub(crate) grad_fn: Option<Arc<Node>>,
    /// Set once the storage backs a `Parameter`; `requires_grad` is then fixed to true.
    pub(crate) is_parameter: bool,
}

impl TensorData {
    /// Creates a new leaf `TensorData` that does not require grad.
    ///
    /// # Errors
    /// * `TensorCreationError` if `data.len()` does not match the product of `shape`.
    /// * `InvalidShape` if any dimension is zero.
    pub fn new(data: Vec<f64>, shape: Vec<usize>) -> Result<Self, MinigradError> {
        if shape.contains(&0) {
            return Err(MinigradError::InvalidShape {
                shape,
                operation: "tensor creation".to_string(),
            });
        }
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(MinigradError::TensorCreationError {
                data_len: data.len(),
                shape,
            });
        }
        Ok(TensorData {
            data,
            shape,
            requires_grad: false,
            grad: None,
            grad_fn: None,
            is_parameter: false,
        })
    }

    /// Number of elements.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// True when no operation produced this tensor.
    pub fn is_leaf(&self) -> bool {
        self.grad_fn.is_none()
    }
}
