//! Elementwise arithmetic.

pub mod pow;

pub use pow::pow_op;
