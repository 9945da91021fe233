use crate::autograd::{is_grad_enabled, no_grad};
use crate::error::MinigradError;
use crate::nn::Module;
use crate::ops::loss::nll_loss_op;
use crate::optim::Optimizer;
use crate::tensor::Tensor;
use crate::train::config::TrainingConfig;

/// One `([batch, features] inputs, class labels)` pair.
pub type Batch = (Tensor, Vec<usize>);

/// Anything a batch sequence may yield: a ready batch, or the result of
/// producing one (as data loaders do).
pub trait IntoBatch {
    fn into_batch(self) -> Result<Batch, MinigradError>;
}

impl IntoBatch for Batch {
    fn into_batch(self) -> Result<Batch, MinigradError> {
        Ok(self)
    }
}

impl IntoBatch for Result<Batch, MinigradError> {
    fn into_batch(self) -> Result<Batch, MinigradError> {
        self
    }
}

/// Summary of one training epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochReport {
    /// Zero-based epoch index.
    pub epoch: usize,
    /// Mean of the per-batch losses.
    pub mean_loss: f64,
    pub batches: usize,
}

/// Summary of a pass over held-out data.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalReport {
    /// Loss averaged over examples.
    pub mean_loss: f64,
    /// Fraction of examples whose arg-max prediction matched the label.
    pub accuracy: f64,
    pub examples: usize,
}

/// One SGD step on a single batch; returns the batch loss.
///
/// The model must output `[batch, classes]` log-probabilities. The forward pass
/// and the loss are computed before any gradient is touched, so a shape or label
/// error leaves the parameters and their gradients unchanged.
///
/// # Errors
/// `GradientModeDisabled` when called inside a no-grad scope; nothing is run.
pub fn train_step<M, O>(
    model: &M,
    optimizer: &mut O,
    inputs: &Tensor,
    labels: &[usize],
) -> Result<f64, MinigradError>
where
    M: Module + ?Sized,
    O: Optimizer + ?Sized,
{
    if !is_grad_enabled() {
        return Err(MinigradError::GradientModeDisabled {
            operation: "train_step".to_string(),
        });
    }
    let log_probs = model.forward(inputs)?;
    let loss = nll_loss_op(&log_probs, labels)?;
    if !loss.requires_grad() {
        log::warn!("train_step: loss does not depend on any parameter; step is a no-op");
    }

    optimizer.zero_grad();
    loss.backward()?;
    optimizer.step()?;

    loss.item()
}

/// Runs [`train_step`] over every batch and returns `(mean_loss, batch_count)`.
fn run_epoch<M, O, I>(model: &M, optimizer: &mut O, batches: I) -> Result<(f64, usize), MinigradError>
where
    M: Module + ?Sized,
    O: Optimizer + ?Sized,
    I: IntoIterator,
    I::Item: IntoBatch,
{
    let mut total = 0.0;
    let mut count = 0usize;
    for item in batches {
        let (inputs, labels) = item.into_batch()?;
        let loss = train_step(model, optimizer, &inputs, &labels)?;
        if !loss.is_finite() {
            log::warn!("non-finite loss {} at batch {}", loss, count);
        }
        total += loss;
        count += 1;
    }
    if count == 0 {
        return Err(MinigradError::EmptyReduction {
            operation: "train_one_epoch".to_string(),
        });
    }
    Ok((total / count as f64, count))
}

/// Trains on every batch once and returns the mean batch loss.
///
/// # Errors
/// `EmptyReduction` when `batches` yields nothing; otherwise the first error of
/// a step. Batches before the failing one stay applied.
pub fn train_one_epoch<M, O, I>(model: &M, optimizer: &mut O, batches: I) -> Result<f64, MinigradError>
where
    M: Module + ?Sized,
    O: Optimizer + ?Sized,
    I: IntoIterator,
    I::Item: IntoBatch,
{
    run_epoch(model, optimizer, batches).map(|(mean, _)| mean)
}

/// Runs `config.epochs` epochs. `epoch_batches(epoch)` must return that epoch's
/// batch sequence (a fresh pass over the data).
///
/// The optimizer's own learning rate is used; build it with
/// [`TrainingConfig::sgd_for`] to take the configured one.
pub fn fit<M, O, F, I>(
    model: &M,
    optimizer: &mut O,
    config: &TrainingConfig,
    mut epoch_batches: F,
) -> Result<Vec<EpochReport>, MinigradError>
where
    M: Module + ?Sized,
    O: Optimizer + ?Sized,
    F: FnMut(usize) -> I,
    I: IntoIterator,
    I::Item: IntoBatch,
{
    config.validate()?;
    if optimizer.learning_rate() != config.learning_rate {
        log::debug!(
            "optimizer learning rate {} differs from configured {}",
            optimizer.learning_rate(),
            config.learning_rate
        );
    }

    let mut reports = Vec::with_capacity(config.epochs);
    for epoch in 0..config.epochs {
        let (mean_loss, batches) = run_epoch(model, optimizer, epoch_batches(epoch))?;
        log::info!(
            "epoch {}/{}: mean loss {:.6} over {} batches",
            epoch + 1,
            config.epochs,
            mean_loss,
            batches
        );
        reports.push(EpochReport {
            epoch,
            mean_loss,
            batches,
        });
    }
    Ok(reports)
}

/// Loss and accuracy of `model` over `batches`, with graph construction disabled.
///
/// # Errors
/// `EmptyReduction` when `batches` yields nothing.
pub fn evaluate<M, I>(model: &M, batches: I) -> Result<EvalReport, MinigradError>
where
    M: Module + ?Sized,
    I: IntoIterator,
    I::Item: IntoBatch,
{
    let _guard = no_grad();

    let mut loss_sum = 0.0;
    let mut correct = 0usize;
    let mut examples = 0usize;
    for item in batches {
        let (inputs, labels) = item.into_batch()?;
        let log_probs = model.forward(&inputs)?;
        let loss = nll_loss_op(&log_probs, &labels)?.item()?;
        let predictions = log_probs.argmax(1)?;

        loss_sum += loss * labels.len() as f64;
        correct += predictions
            .iter()
            .zip(labels.iter())
            .filter(|(p, t)| p == t)
            .count();
        examples += labels.len();
    }
    if examples == 0 {
        return Err(MinigradError::EmptyReduction {
            operation: "evaluate".to_string(),
        });
    }
    log::debug!("evaluated {} examples, {} correct", examples, correct);

    Ok(EvalReport {
        mean_loss: loss_sum / examples as f64,
        accuracy: correct as f64 / examples as f64,
        examples,
    })
}

#[cfg(test)]
#[path = "epoch_test.rs"]
mod tests;
