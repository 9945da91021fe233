use crate::autograd::Operation;
use crate::error::MinigradError;
use crate::ops::apply_unary_op;
use crate::tensor::Tensor;

/// Raises every element to `exponent`.
///
/// Integral exponents go through `powi`, so negative bases stay real.
pub fn pow_op(input: &Tensor, exponent: f64) -> Result<Tensor, MinigradError> {
    apply_unary_op(
        input,
        move |x| power(x, exponent),
        |x, _| Operation::Pow {
            exponent,
            input: x.to_vec(),
        },
    )
}

fn power(x: f64, exponent: f64) -> f64 {
    if exponent.fract() == 0.0 && exponent.abs() <= i32::MAX as f64 {
        x.powi(exponent as i32)
    } else {
        x.powf(exponent)
    }
}

/// `dx = g · p · x^(p − 1)`.
pub(crate) fn pow_backward(input: &[f64], exponent: f64, grad_output: &[f64]) -> Vec<f64> {
    input
        .iter()
        .zip(grad_output.iter())
        .map(|(&x, &g)| g * exponent * power(x, exponent - 1.0))
        .collect()
}

#[cfg(test)]
#[path = "pow_test.rs"]
mod tests;
