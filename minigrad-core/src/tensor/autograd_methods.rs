// src/tensor/autograd_methods.rs

use crate::autograd::graph::Node;
use crate::autograd::operation::Operation;
use crate::error::MinigradError;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use std::sync::{Arc, RwLock};

impl Tensor {
    /// Checks if the tensor requires gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Sets the `requires_grad` status of this tensor **in-place**.
    ///
    /// Enabling tracking allocates a zeroed gradient buffer (kept if one already
    /// exists); disabling it drops the buffer. Only allowed on leaf tensors.
    ///
    /// # Errors
    /// * `RequiresGradOnNonLeaf` if an operation produced this tensor.
    /// * `ParameterRequiresGrad` when disabling tracking on a parameter's storage.
    pub fn requires_grad_(&self, requires_grad: bool) -> Result<(), MinigradError> {
        let mut guard = self.write_data();
        if guard.grad_fn.is_some() {
            return Err(MinigradError::RequiresGradOnNonLeaf);
        }
        if guard.is_parameter && !requires_grad {
            return Err(MinigradError::ParameterRequiresGrad);
        }
        guard.requires_grad = requires_grad;
        if requires_grad {
            if guard.grad.is_none() {
                guard.grad = Some(vec![0.0; guard.numel()]);
            }
        } else {
            guard.grad = None;
        }
        Ok(())
    }

    /// Enables tracking and pins it on; used by `Parameter::new`.
    pub(crate) fn mark_parameter(&self) -> Result<(), MinigradError> {
        self.requires_grad_(true)?;
        self.write_data().is_parameter = true;
        Ok(())
    }

    /// True if no operation produced this tensor.
    pub fn is_leaf(&self) -> bool {
        self.read_data().is_leaf()
    }

    /// Returns the graph node that produced this tensor, if any.
    pub fn grad_fn(&self) -> Option<Arc<Node>> {
        self.read_data().grad_fn.clone()
    }

    /// Returns a copy of the gradient buffer as a new (untracked) tensor.
    ///
    /// `None` for tensors that never tracked gradients and for non-leaf tensors.
    pub fn grad(&self) -> Option<Tensor> {
        self.try_grad().ok()
    }

    /// Like [`Tensor::grad`] but says why no gradient is available.
    ///
    /// # Errors
    /// * `UntrackedGradientAccess` if the tensor does not require grad.
    /// * `GradientNotRetained` if the tensor is the output of an operation.
    pub fn try_grad(&self) -> Result<Tensor, MinigradError> {
        let guard = self.read_data();
        if !guard.requires_grad {
            return Err(MinigradError::UntrackedGradientAccess);
        }
        match guard.grad.as_ref() {
            Some(grad) => Tensor::new(grad.clone(), guard.shape.clone()),
            None => Err(MinigradError::GradientNotRetained),
        }
    }

    /// Resets the gradient buffer to zeros, keeping its allocation.
    pub fn zero_grad(&self) {
        let mut guard = self.write_data();
        if let Some(grad) = guard.grad.as_mut() {
            grad.iter_mut().for_each(|g| *g = 0.0);
        }
    }

    /// Creates a new leaf tensor with a copy of the values, detached from the
    /// computation graph and not requiring grad.
    pub fn detach(&self) -> Tensor {
        let guard = self.read_data();
        let detached_data = TensorData {
            data: guard.data.clone(),
            shape: guard.shape.clone(),
            requires_grad: false,
            grad: None,
            grad_fn: None,
            is_parameter: false,
        };
        Tensor {
            data: Arc::new(RwLock::new(detached_data)),
        }
    }

    /// Computes the gradients of this single-value tensor w.r.t. graph leaves.
    ///
    /// See [`crate::autograd::backward`].
    pub fn backward(&self) -> Result<(), MinigradError> {
        crate::autograd::backward(self)
    }

    /// Adds `delta` into the gradient buffer.
    pub(crate) fn accumulate_grad(&self, delta: &[f64]) -> Result<(), MinigradError> {
        let mut guard = self.write_data();
        let shape = guard.shape.clone();
        let grad = guard
            .grad
            .as_mut()
            .ok_or(MinigradError::UntrackedGradientAccess)?;
        if grad.len() != delta.len() {
            return Err(MinigradError::ShapeMismatch {
                expected: shape,
                actual: vec![delta.len()],
                operation: "accumulate_grad".to_string(),
            });
        }
        for (g, d) in grad.iter_mut().zip(delta.iter()) {
            *g += *d;
        }
        Ok(())
    }

    /// `value ← value − learning_rate × grad`, on the existing storage.
    pub(crate) fn apply_gradient_step(&self, learning_rate: f64) -> Result<(), MinigradError> {
        let mut guard = self.write_data();
        let TensorData { data, grad, .. } = &mut *guard;
        let grad = grad.as_ref().ok_or(MinigradError::UntrackedGradientAccess)?;
        for (value, g) in data.iter_mut().zip(grad.iter()) {
            *value -= learning_rate * *g;
        }
        Ok(())
    }

    /// Turns a freshly computed output into a non-leaf node of the graph.
    pub(crate) fn attach_node(&self, op: Operation, inputs: Vec<Tensor>) {
        let node = Node::new(op, inputs);
        let mut guard = self.write_data();
        guard.requires_grad = true;
        guard.grad = None;
        guard.grad_fn = Some(Arc::new(node));
    }
}
