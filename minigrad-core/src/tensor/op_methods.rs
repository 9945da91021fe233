use crate::error::MinigradError;
use crate::ops;
use crate::tensor::Tensor;

/// Method-call forms of the operations in [`crate::ops`].
impl Tensor {
    pub fn relu(&self) -> Result<Tensor, MinigradError> {
        ops::activation::relu_op(self)
    }

    pub fn sigmoid(&self) -> Result<Tensor, MinigradError> {
        ops::activation::sigmoid_op(self)
    }

    pub fn log_softmax(&self, axis: usize) -> Result<Tensor, MinigradError> {
        ops::activation::log_softmax_op(self, axis)
    }

    pub fn pow(&self, exponent: f64) -> Result<Tensor, MinigradError> {
        ops::arithmetic::pow_op(self, exponent)
    }

    pub fn mean(&self) -> Result<Tensor, MinigradError> {
        ops::reduction::mean_op(self)
    }

    /// See [`ops::reduction::argmax_op`].
    pub fn argmax(&self, axis: usize) -> Result<Vec<usize>, MinigradError> {
        ops::reduction::argmax_op(self, axis)
    }

    /// Treats `self` as `[N, C]` log-probabilities.
    pub fn nll_loss(&self, labels: &[usize]) -> Result<Tensor, MinigradError> {
        ops::loss::nll_loss_op(self, labels)
    }

    /// `self · weight + bias`.
    pub fn linear(&self, weight: &Tensor, bias: &Tensor) -> Result<Tensor, MinigradError> {
        ops::linalg::linear_op(self, weight, bias)
    }
}
