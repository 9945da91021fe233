use crate::error::MinigradError;
use crate::nn::Module;
use crate::optim::SgdOptimizer;

/// Hyper-parameters of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    /// Constant SGD step size.
    pub learning_rate: f64,
    pub epochs: usize,
    pub batch_size: usize,
    /// Reshuffle the examples every epoch.
    pub shuffle: bool,
    /// Seed for shuffling; `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            learning_rate: 0.003,
            epochs: 5,
            batch_size: 64,
            shuffle: true,
            seed: None,
        }
    }
}

impl TrainingConfig {
    /// # Errors
    /// `InvalidConfig` for a non-finite or non-positive learning rate, zero
    /// epochs or a zero batch size.
    pub fn validate(&self) -> Result<(), MinigradError> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(MinigradError::InvalidConfig(format!(
                "learning_rate must be finite and positive, got {}",
                self.learning_rate
            )));
        }
        if self.epochs == 0 {
            return Err(MinigradError::InvalidConfig(
                "epochs must be at least 1".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(MinigradError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// SGD over every parameter of `model` with this run's learning rate.
    pub fn sgd_for(&self, model: &dyn Module) -> Result<SgdOptimizer, MinigradError> {
        SgdOptimizer::for_module(model, self.learning_rate)
    }
}
