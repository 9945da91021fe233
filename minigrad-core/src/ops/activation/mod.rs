//! # Activation Functions
//!
//! Elementwise nonlinearities and the log-softmax normaliser used before the
//! negative-log-likelihood loss.

pub mod log_softmax;
pub mod relu;
pub mod sigmoid;

pub use log_softmax::log_softmax_op;
pub use relu::relu_op;
pub use sigmoid::sigmoid_op;
