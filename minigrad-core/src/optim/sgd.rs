use crate::error::MinigradError;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::optim::optimizer_trait::Optimizer;

/// Plain stochastic gradient descent with a constant learning rate.
///
/// Holds handles to the parameters it updates; there is no per-parameter state.
#[derive(Debug, Clone)]
pub struct SgdOptimizer {
    params: Vec<Parameter>,
    lr: f64,
}

impl SgdOptimizer {
    /// Creates a new `SgdOptimizer` over `params`.
    ///
    /// # Errors
    /// `InvalidConfig` if `lr` is not a finite positive number.
    pub fn new(params: impl IntoIterator<Item = Parameter>, lr: f64) -> Result<Self, MinigradError> {
        if !(lr.is_finite() && lr > 0.0) {
            return Err(MinigradError::InvalidConfig(format!(
                "learning rate must be finite and positive, got {}",
                lr
            )));
        }
        Ok(SgdOptimizer {
            params: params.into_iter().collect(),
            lr,
        })
    }

    /// Optimizes every parameter of `module`.
    pub fn for_module(module: &dyn Module, lr: f64) -> Result<Self, MinigradError> {
        Self::new(module.parameters().into_iter().cloned(), lr)
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }
}

impl Optimizer for SgdOptimizer {
    fn step(&mut self) -> Result<(), MinigradError> {
        log::trace!(
            "SGD step over {} parameters (lr = {})",
            self.params.len(),
            self.lr
        );
        for param in &self.params {
            param.update(self.lr)?;
        }
        Ok(())
    }

    fn zero_grad(&mut self) {
        for param in &self.params {
            param.zero_grad();
        }
    }

    fn learning_rate(&self) -> f64 {
        self.lr
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
