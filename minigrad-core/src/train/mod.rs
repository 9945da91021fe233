//! Training loop: zero → forward → loss → backward → update, batch after batch.

pub mod config;
pub mod epoch;

pub use config::TrainingConfig;
pub use epoch::{
    evaluate, fit, train_one_epoch, train_step, Batch, EpochReport, EvalReport, IntoBatch,
};
