use thiserror::Error;

/// Custom error type for the minigrad crates.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum MinigradError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Invalid shape {shape:?} for operation {operation}")]
    InvalidShape {
        shape: Vec<usize>,
        operation: String,
    },

    #[error("Gradient read on a tensor that does not track gradients.")]
    UntrackedGradientAccess,

    #[error("Gradients are only retained on leaf tensors.")]
    GradientNotRetained,

    #[error("requires_grad can only be changed on leaf tensors.")]
    RequiresGradOnNonLeaf,

    #[error("Parameters always require grad; requires_grad_(false) is not allowed on them.")]
    ParameterRequiresGrad,

    #[error("Gradient tracking is disabled; {operation} needs it enabled.")]
    GradientModeDisabled { operation: String },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Label {label} is out of range for {class_count} classes")]
    LabelOutOfRange { label: usize, class_count: usize },

    #[error("Axis {axis} is out of range for a tensor of rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    #[error("Cannot reduce an empty input in {operation}")]
    EmptyReduction { operation: String },

    #[error("Index out of bounds: index {index} for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
