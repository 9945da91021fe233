use crate::error::MinigradError;
use crate::ops::activation::{log_softmax, relu, sigmoid};
use crate::ops::arithmetic::pow;
use crate::ops::linalg::linear;
use crate::ops::loss::nll;
use crate::ops::reduction::mean;
use crate::tensor::Tensor;

/// The closed set of differentiable operations a graph node can record.
///
/// Each variant owns whatever forward-time values its local derivative needs,
/// so an in-place update of an input between two backward passes over the same
/// graph does not change the gradients the graph produces.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// `y = x·W + b`; inputs `[x, weight, bias]`. Keeps `x` and `W`.
    Linear {
        input: Vec<f64>,
        weight: Vec<f64>,
        in_features: usize,
        out_features: usize,
    },
    /// Keeps the forward output `σ(x)`.
    Sigmoid { output: Vec<f64> },
    /// Keeps the pre-activation input.
    Relu { input: Vec<f64> },
    /// Keeps `softmax(x)` along `axis`.
    LogSoftmax { axis: usize, softmax: Vec<f64> },
    /// Elementwise `x^exponent`; keeps `x`.
    Pow { exponent: f64, input: Vec<f64> },
    /// Mean over every element of the input.
    Mean { count: usize },
    /// Batch-mean negative log-likelihood of `labels` under `[N, C]` log-probabilities.
    NllLoss { labels: Vec<usize> },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Linear { .. } => "linear",
            Operation::Sigmoid { .. } => "sigmoid",
            Operation::Relu { .. } => "relu",
            Operation::LogSoftmax { .. } => "log_softmax",
            Operation::Pow { .. } => "pow",
            Operation::Mean { .. } => "mean",
            Operation::NllLoss { .. } => "nll_loss",
        }
    }

    /// Maps the gradient of this operation's output to one gradient per input.
    ///
    /// The returned vector has exactly one entry per input, in input order. An
    /// entry is `None` when the input does not require grad and the local
    /// derivative was not computed.
    pub(crate) fn backward(
        &self,
        inputs: &[Tensor],
        grad_output: &[f64],
    ) -> Result<Vec<Option<Vec<f64>>>, MinigradError> {
        let wanted: Vec<bool> = inputs.iter().map(|t| t.requires_grad()).collect();
        let expect_inputs = |n: usize| -> Result<(), MinigradError> {
            if inputs.len() != n {
                return Err(MinigradError::ShapeMismatch {
                    expected: vec![n],
                    actual: vec![inputs.len()],
                    operation: format!("{} backward (input count)", self.name()),
                });
            }
            Ok(())
        };

        match self {
            Operation::Linear {
                input,
                weight,
                in_features,
                out_features,
            } => {
                expect_inputs(3)?;
                linear::linear_backward(input, weight, *in_features, *out_features, grad_output, &wanted)
            }
            Operation::Sigmoid { output } => {
                expect_inputs(1)?;
                Ok(vec![wanted[0].then(|| sigmoid::sigmoid_backward(output, grad_output))])
            }
            Operation::Relu { input } => {
                expect_inputs(1)?;
                Ok(vec![wanted[0].then(|| relu::relu_backward(input, grad_output))])
            }
            Operation::LogSoftmax { axis, softmax } => {
                expect_inputs(1)?;
                let shape = inputs[0].shape();
                Ok(vec![wanted[0].then(|| {
                    log_softmax::log_softmax_backward(softmax, &shape, *axis, grad_output)
                })])
            }
            Operation::Pow { exponent, input } => {
                expect_inputs(1)?;
                Ok(vec![wanted[0].then(|| pow::pow_backward(input, *exponent, grad_output))])
            }
            Operation::Mean { count } => {
                expect_inputs(1)?;
                Ok(vec![wanted[0].then(|| mean::mean_backward(*count, grad_output))])
            }
            Operation::NllLoss { labels } => {
                expect_inputs(1)?;
                let shape = inputs[0].shape();
                Ok(vec![wanted[0].then(|| nll::nll_loss_backward(labels, &shape, grad_output))])
            }
        }
    }
}
