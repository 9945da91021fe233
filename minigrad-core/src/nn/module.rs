use crate::error::MinigradError;
use crate::nn::Parameter;
use crate::tensor::Tensor;

/// The base trait for all neural network modules (layers, containers, etc.).
pub trait Module: std::fmt::Debug + Send + Sync {
    /// Performs a forward pass of the module.
    ///
    /// Every call builds a fresh graph from the current parameter values; the
    /// module itself is not changed.
    fn forward(&self, input: &Tensor) -> Result<Tensor, MinigradError>;

    /// Returns all learnable parameters of the module, including those of
    /// sub-modules, in forward order.
    fn parameters(&self) -> Vec<&Parameter>;

    /// Returns all learnable parameters along with their names.
    /// Names follow the module hierarchy (e.g. "fc1.weight", "fc1.bias").
    fn named_parameters(&self) -> Vec<(String, &Parameter)>;

    /// Resets the gradient buffer of every parameter.
    fn zero_grad(&self) {
        for param in self.parameters() {
            param.zero_grad();
        }
    }
}
