//! Reductions.

pub mod argmax;
pub mod mean;

pub use argmax::argmax_op;
pub use mean::mean_op;
