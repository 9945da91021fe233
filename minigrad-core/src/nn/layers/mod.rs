// src/nn/layers/mod.rs

pub mod activations;
pub mod linear;

pub use activations::{LogSoftmax, ReLU, Sigmoid};
pub use linear::Linear;
