use crate::autograd::Operation;
use crate::error::MinigradError;
use crate::ops::apply_unary_op;
use crate::tensor::Tensor;

/// Applies the Rectified Linear Unit (ReLU) activation function element-wise.
///
/// ReLU(x) = max(0, x)
pub fn relu_op(input: &Tensor) -> Result<Tensor, MinigradError> {
    apply_unary_op(
        input,
        |x| if x > 0.0 { x } else { 0.0 },
        |x, _| Operation::Relu { input: x.to_vec() },
    )
}

/// `dx = grad` where `x > 0`, else 0. The gradient at exactly `x == 0` is 0.
pub(crate) fn relu_backward(input: &[f64], grad_output: &[f64]) -> Vec<f64> {
    input
        .iter()
        .zip(grad_output.iter())
        .map(|(&x, &g)| if x > 0.0 { g } else { 0.0 })
        .collect()
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
