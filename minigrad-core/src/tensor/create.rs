// src/tensor/create.rs

use crate::error::MinigradError;
use crate::tensor::Tensor;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::StandardNormal;

/// Creates a new tensor filled with zeros with the specified shape.
pub fn zeros(shape: &[usize]) -> Result<Tensor, MinigradError> {
    full(shape, 0.0)
}

/// Creates a new tensor filled with ones with the specified shape.
pub fn ones(shape: &[usize]) -> Result<Tensor, MinigradError> {
    full(shape, 1.0)
}

/// Creates a new tensor filled with `value` with the specified shape.
pub fn full(shape: &[usize], value: f64) -> Result<Tensor, MinigradError> {
    let numel = shape.iter().product();
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates a new tensor filled with zeros, having the same shape as the input tensor.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, MinigradError> {
    zeros(&tensor.shape())
}

/// Samples every element uniformly from `[low, high)`.
///
/// # Errors
/// `InvalidConfig` unless `low < high` and both bounds are finite.
pub fn rand_uniform<R: Rng + ?Sized>(
    shape: &[usize],
    low: f64,
    high: f64,
    rng: &mut R,
) -> Result<Tensor, MinigradError> {
    if !(low.is_finite() && high.is_finite() && low < high) {
        return Err(MinigradError::InvalidConfig(format!(
            "rand_uniform requires finite bounds with low < high, got [{}, {})",
            low, high
        )));
    }
    let dist = Uniform::new(low, high);
    let numel = shape.iter().product();
    let data_vec: Vec<f64> = (0..numel).map(|_| dist.sample(rng)).collect();
    Tensor::new(data_vec, shape.to_vec())
}

/// Samples every element from the standard normal distribution.
pub fn randn<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> Result<Tensor, MinigradError> {
    let numel = shape.iter().product();
    let data_vec: Vec<f64> = (0..numel)
        .map(|_| -> f64 { StandardNormal.sample(rng) })
        .collect();
    Tensor::new(data_vec, shape.to_vec())
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
