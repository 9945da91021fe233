//! Minimal reverse-mode automatic differentiation with dense layers, an SGD
//! optimizer and a batch training loop.
//!
//! ```
//! use minigrad_core::{autograd, Tensor};
//!
//! let x = autograd::track(&Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2])?)?;
//! let z = x.pow(2.0)?.mean()?;
//! z.backward()?;
//! assert_eq!(x.grad().unwrap().to_vec(), vec![0.5, 1.0, 1.5, 2.0]);
//! # Ok::<(), minigrad_core::MinigradError>(())
//! ```

pub mod autograd;
pub mod error;
pub mod model;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod tensor;
pub mod tensor_data;
pub mod train;
pub mod utils;

pub use error::MinigradError;
pub use tensor::Tensor;
