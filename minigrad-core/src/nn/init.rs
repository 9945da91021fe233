use crate::error::MinigradError;
use crate::tensor::{rand_uniform, Tensor};
use rand::Rng;

/// Half-width `1/√fan_in` of the default uniform initialisation.
pub fn default_uniform_bound(fan_in: usize) -> f64 {
    1.0 / (fan_in as f64).sqrt()
}

/// Samples a `shape` tensor uniformly from `±1/√fan_in`.
///
/// # Errors
/// `InvalidConfig` when `fan_in` is zero.
pub fn uniform_fan_in<R: Rng + ?Sized>(
    shape: &[usize],
    fan_in: usize,
    rng: &mut R,
) -> Result<Tensor, MinigradError> {
    if fan_in == 0 {
        return Err(MinigradError::InvalidConfig(
            "fan_in must be positive for uniform initialisation".to_string(),
        ));
    }
    let bound = default_uniform_bound(fan_in);
    rand_uniform(shape, -bound, bound, rng)
}
