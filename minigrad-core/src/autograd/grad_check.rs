use crate::autograd::grad_mode::with_no_grad;
use crate::error::MinigradError;
use crate::tensor::Tensor;
use approx::relative_eq;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical_grad} != numerical {numerical_grad} (difference {difference})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(MinigradError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(MinigradError),
    #[error("Function output must hold a single value, got shape {shape:?}")]
    NonScalarOutput { shape: Vec<usize> },
    #[error("Input tensor {input_index} requires grad but has no gradient after backward pass.")]
    MissingAnalyticalGrad { input_index: usize },
    #[error("Numerical gradient is not finite for input {input_index}, element {element_index} (loss+ {loss_plus}, loss- {loss_minus})")]
    NumericalGradNotFinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Gradient check input tensor must be a leaf node (no grad_fn). Input index: {input_index}")]
    InputNotLeaf { input_index: usize },
    #[error("Tensor error during intermediate calculation: {0}")]
    TensorError(MinigradError),
}

impl From<MinigradError> for GradCheckError {
    fn from(err: MinigradError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Checks analytical gradients against central finite differences.
///
/// `func` must return a single-value tensor. The gradient buffers of the tracked
/// `inputs` are zeroed and then hold the analytical gradient when this returns.
/// Every element of every tracked input is perturbed by `±epsilon` on a detached
/// copy; the two perturbed forwards run with graph construction disabled.
/// Values are compared with `approx::relative_eq!` using `tolerance` both as the
/// absolute and the relative bound.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, MinigradError>,
{
    for (i, input) in inputs.iter().enumerate() {
        if !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index: i });
        }
        input.zero_grad();
    }

    // --- Analytical pass ---
    let output = func(inputs).map_err(GradCheckError::ForwardPassError)?;
    if output.numel() != 1 {
        return Err(GradCheckError::NonScalarOutput {
            shape: output.shape(),
        });
    }
    output.backward().map_err(GradCheckError::BackwardPassError)?;

    // --- Numerical pass ---
    let evaluate = |perturbed: &[Tensor]| -> Result<f64, GradCheckError> {
        let out = with_no_grad(|| func(perturbed)).map_err(GradCheckError::ForwardPassError)?;
        Ok(out.item()?)
    };

    for (i, input) in inputs.iter().enumerate() {
        if !input.requires_grad() {
            continue;
        }
        let analytical = input
            .grad()
            .ok_or(GradCheckError::MissingAnalyticalGrad { input_index: i })?
            .to_vec();
        let original = input.to_vec();
        let shape = input.shape();

        for elem_idx in 0..original.len() {
            let shifted = |delta: f64| -> Result<f64, GradCheckError> {
                let mut values = original.clone();
                values[elem_idx] += delta;
                let mut perturbed: Vec<Tensor> = inputs.to_vec();
                perturbed[i] = Tensor::new(values, shape.clone())?;
                evaluate(&perturbed)
            };
            let loss_plus = shifted(epsilon)?;
            let loss_minus = shifted(-epsilon)?;
            let numerical = (loss_plus - loss_minus) / (2.0 * epsilon);

            if !numerical.is_finite() {
                return Err(GradCheckError::NumericalGradNotFinite {
                    input_index: i,
                    element_index: elem_idx,
                    loss_plus,
                    loss_minus,
                });
            }
            let analytical_grad = analytical[elem_idx];
            if !relative_eq!(
                analytical_grad,
                numerical,
                epsilon = tolerance,
                max_relative = tolerance
            ) {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: elem_idx,
                    analytical_grad,
                    numerical_grad: numerical,
                    difference: (analytical_grad - numerical).abs(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
