use crate::autograd::Operation;
use crate::error::MinigradError;
use crate::ops::apply_unary_op;
use crate::tensor::Tensor;

/// Logistic function, evaluated without overflowing `exp` for large `|x|`.
fn logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Applies the sigmoid `σ(x) = 1 / (1 + e^-x)` element-wise.
///
/// The output values are kept in the graph node for the backward pass.
pub fn sigmoid_op(input: &Tensor) -> Result<Tensor, MinigradError> {
    apply_unary_op(input, logistic, |_, output| Operation::Sigmoid {
        output: output.to_vec(),
    })
}

/// `dx = grad · y · (1 − y)` with `y` the saved forward output.
pub(crate) fn sigmoid_backward(output: &[f64], grad_output: &[f64]) -> Vec<f64> {
    output
        .iter()
        .zip(grad_output.iter())
        .map(|(&y, &g)| g * y * (1.0 - y))
        .collect()
}

#[cfg(test)]
#[path = "sigmoid_test.rs"]
mod tests;
