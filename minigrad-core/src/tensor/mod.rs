// src/tensor/mod.rs

use crate::error::MinigradError;
use crate::tensor_data::TensorData;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

mod autograd_methods;
pub mod create;
mod op_methods;

pub use create::{full, ones, rand_uniform, randn, zeros, zeros_like};

/// A multi-dimensional array of `f64` values.
///
/// `Tensor` uses `Arc<RwLock<TensorData>>` internally to allow for:
/// 1.  **Shared Ownership:** Cloning a `Tensor` is cheap and yields a handle to the
///     same storage. Layers, optimizers and graph nodes all hold such handles, so
///     identity is storage identity.
/// 2.  **Interior Mutability:** Gradients and parameter values can be updated in
///     place through an immutable handle. The lock serialises concurrent writers.
pub struct Tensor {
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Tensor {
    /// Creates a new leaf tensor from row-major values and a shape.
    ///
    /// The tensor does not track gradients; see [`Tensor::requires_grad_`] or
    /// [`crate::autograd::track`].
    pub fn new(data: Vec<f64>, shape: Vec<usize>) -> Result<Self, MinigradError> {
        let tensor_data = TensorData::new(data, shape)?;
        Ok(Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        })
    }

    /// Creates a 0-dimensional tensor holding a single value.
    pub fn scalar(value: f64) -> Self {
        Tensor {
            data: Arc::new(RwLock::new(TensorData {
                data: vec![value],
                shape: Vec::new(),
                requires_grad: false,
                grad: None,
                grad_fn: None,
                is_parameter: false,
            })),
        }
    }

    /// Returns a clone of the tensor's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape.clone()
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.read_data().shape.len()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Copies the values out in row-major order.
    pub fn to_vec(&self) -> Vec<f64> {
        self.read_data().data.clone()
    }

    /// Returns the single value of a one-element tensor.
    pub fn item(&self) -> Result<f64, MinigradError> {
        let guard = self.read_data();
        if guard.numel() != 1 {
            return Err(MinigradError::InvalidShape {
                shape: guard.shape.clone(),
                operation: "item".to_string(),
            });
        }
        Ok(guard.data[0])
    }

    /// True if both handles point at the same storage.
    pub fn same_storage(&self, other: &Tensor) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Acquires a read lock on the tensor's data.
    ///
    /// Panics if the RwLock is poisoned.
    pub fn read_data(&self) -> RwLockReadGuard<'_, TensorData> {
        self.data.read().expect("RwLock poisoned")
    }

    /// Acquires a write lock on the tensor's data.
    ///
    /// Panics if the RwLock is poisoned.
    pub fn write_data(&self) -> RwLockWriteGuard<'_, TensorData> {
        self.data.write().expect("RwLock poisoned")
    }
}

impl Clone for Tensor {
    /// Clones the handle, not the values.
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.read_data();
        let mut s = f.debug_struct("Tensor");
        s.field("shape", &guard.shape)
            .field("requires_grad", &guard.requires_grad);
        if let Some(node) = guard.grad_fn.as_ref() {
            s.field("grad_fn", &node.op().name());
        }
        s.field("data", &guard.data).finish()
    }
}
