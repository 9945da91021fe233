//! Dense linear algebra.

pub mod linear;

pub use linear::linear_op;
