use crate::error::MinigradError;
use crate::nn::init::uniform_fan_in;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::ops::linalg::linear_op;
use crate::tensor::Tensor;
use rand::Rng;

/// Applies a linear transformation to the incoming data: `y = x·W + b`.
///
/// The weight is stored `[in_features, out_features]` so a `[batch, in_features]`
/// input multiplies it directly; the bias is `[out_features]`.
#[derive(Debug, Clone)]
pub struct Linear {
    weight: Parameter,
    bias: Parameter,
    in_features: usize,
    out_features: usize,
}

impl Linear {
    /// Creates a layer initialised uniformly in `±1/√in_features` from the thread RNG.
    pub fn new(in_features: usize, out_features: usize) -> Result<Self, MinigradError> {
        Self::with_rng(in_features, out_features, &mut rand::thread_rng())
    }

    /// Same as [`Linear::new`] but draws from `rng`, for reproducible runs.
    ///
    /// # Errors
    /// `InvalidShape` if either feature count is zero.
    pub fn with_rng<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        rng: &mut R,
    ) -> Result<Self, MinigradError> {
        if in_features == 0 || out_features == 0 {
            return Err(MinigradError::InvalidShape {
                shape: vec![in_features, out_features],
                operation: "Linear::new".to_string(),
            });
        }
        let weight = uniform_fan_in(&[in_features, out_features], in_features, rng)?;
        let bias = uniform_fan_in(&[out_features], in_features, rng)?;
        Self::from_tensors(weight, bias)
    }

    /// Builds a layer around explicit leaf tensors.
    ///
    /// # Errors
    /// * `InvalidShape` if `weight` is not 2-D.
    /// * `ShapeMismatch` if `bias` is not `[out_features]`.
    pub fn from_tensors(weight: Tensor, bias: Tensor) -> Result<Self, MinigradError> {
        let w_shape = weight.shape();
        if w_shape.len() != 2 {
            return Err(MinigradError::InvalidShape {
                shape: w_shape,
                operation: "Linear weight (expected [in, out])".to_string(),
            });
        }
        let (in_features, out_features) = (w_shape[0], w_shape[1]);
        let b_shape = bias.shape();
        if b_shape != [out_features] {
            return Err(MinigradError::ShapeMismatch {
                expected: vec![out_features],
                actual: b_shape,
                operation: "Linear bias".to_string(),
            });
        }
        Ok(Linear {
            weight: Parameter::new(weight, Some("weight".to_string()))?,
            bias: Parameter::new(bias, Some("bias".to_string()))?,
            in_features,
            out_features,
        })
    }

    pub fn weight(&self) -> &Parameter {
        &self.weight
    }

    pub fn bias(&self) -> &Parameter {
        &self.bias
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }
}

impl Module for Linear {
    fn forward(&self, input: &Tensor) -> Result<Tensor, MinigradError> {
        linear_op(input, &self.weight, &self.bias)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        vec![&self.weight, &self.bias]
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        vec![
            ("weight".to_string(), &self.weight),
            ("bias".to_string(), &self.bias),
        ]
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
