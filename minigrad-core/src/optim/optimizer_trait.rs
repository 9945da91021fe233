use crate::error::MinigradError;

/// Trait defining the common interface for optimizers.
///
/// Optimizers are responsible for updating model parameters based on their gradients.
pub trait Optimizer {
    /// Performs a single optimization step using the accumulated gradients.
    fn step(&mut self) -> Result<(), MinigradError>;

    /// Clears the gradients of all parameters managed by the optimizer.
    ///
    /// Called before each backward pass so gradients do not accumulate across
    /// iterations.
    fn zero_grad(&mut self);

    fn learning_rate(&self) -> f64;
}
