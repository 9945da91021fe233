use crate::error::MinigradError;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::ops::activation::{log_softmax_op, relu_op, sigmoid_op};
use crate::tensor::Tensor;

/// Layer that applies the Rectified Linear Unit (ReLU) activation function.
///
/// This layer does not have any learnable parameters.
#[derive(Debug, Default, Clone)]
pub struct ReLU {}

impl ReLU {
    pub fn new() -> Self {
        ReLU {}
    }
}

impl Module for ReLU {
    fn forward(&self, input: &Tensor) -> Result<Tensor, MinigradError> {
        relu_op(input)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        Vec::new()
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        Vec::new()
    }
}

/// Layer applying the logistic sigmoid element-wise.
#[derive(Debug, Default, Clone)]
pub struct Sigmoid {}

impl Sigmoid {
    pub fn new() -> Self {
        Sigmoid {}
    }
}

impl Module for Sigmoid {
    fn forward(&self, input: &Tensor) -> Result<Tensor, MinigradError> {
        sigmoid_op(input)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        Vec::new()
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        Vec::new()
    }
}

/// Log-softmax over `axis`. The default axis is 1, the class axis of `[N, C]` scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSoftmax {
    axis: usize,
}

impl LogSoftmax {
    pub fn new(axis: usize) -> Self {
        LogSoftmax { axis }
    }

    pub fn axis(&self) -> usize {
        self.axis
    }
}

impl Default for LogSoftmax {
    fn default() -> Self {
        LogSoftmax { axis: 1 }
    }
}

impl Module for LogSoftmax {
    fn forward(&self, input: &Tensor) -> Result<Tensor, MinigradError> {
        log_softmax_op(input, self.axis)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        Vec::new()
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        Vec::new()
    }
}
