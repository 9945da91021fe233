// src/nn/mod.rs
//! Layers, parameters and losses.

pub mod init;
pub mod layers;
pub mod losses;
pub mod module;
pub mod parameter;

pub use layers::{Linear, LogSoftmax, ReLU, Sigmoid};
pub use losses::NLLLoss;
pub use module::Module;
pub use parameter::Parameter;
