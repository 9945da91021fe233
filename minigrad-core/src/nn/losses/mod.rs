pub mod nll;

pub use nll::NLLLoss;
