use crate::error::MinigradError;
use crate::tensor::Tensor;
use std::fmt;
use std::ops::Deref;

/// A wrapper around a Tensor indicating it is a learnable parameter of a Module.
///
/// The wrapped tensor always tracks gradients; `requires_grad_(false)` on it is
/// rejected with `ParameterRequiresGrad`. Its values change only through
/// [`Parameter::update`]; its gradient buffer only through backward passes and
/// `zero_grad`.
pub struct Parameter {
    tensor: Tensor,
    name: Option<String>,
}

impl Parameter {
    /// Wraps a leaf tensor, enabling gradient tracking on it for good.
    ///
    /// # Errors
    /// `RequiresGradOnNonLeaf` if `tensor` is the output of an operation.
    pub fn new(tensor: Tensor, name: Option<String>) -> Result<Self, MinigradError> {
        tensor.mark_parameter()?;
        Ok(Parameter { tensor, name })
    }

    pub fn new_unnamed(tensor: Tensor) -> Result<Self, MinigradError> {
        Self::new(tensor, None)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Handle to the underlying tensor.
    pub fn tensor(&self) -> &Tensor {
        &self.tensor
    }

    /// Plain gradient step: `value ← value − learning_rate × grad`, in place.
    ///
    /// Handles sharing this storage observe the new values. Graphs recorded
    /// before the update keep the values they were built from.
    pub fn update(&self, learning_rate: f64) -> Result<(), MinigradError> {
        self.tensor.apply_gradient_step(learning_rate)
    }
}

impl Deref for Parameter {
    type Target = Tensor;

    fn deref(&self) -> &Self::Target {
        &self.tensor
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Parameter({}: {:?})", name, self.tensor),
            None => write!(f, "Parameter({:?})", self.tensor),
        }
    }
}

impl Clone for Parameter {
    /// Shares the underlying storage.
    fn clone(&self) -> Self {
        Parameter {
            tensor: self.tensor.clone(),
            name: self.name.clone(),
        }
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
