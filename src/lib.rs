pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, BatchConfig};
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::core::{
    engine::SquareEngine,
    square::{compute, spawn, DelayedSquare, PendingSquare, SQUARE_DELAY},
};
pub use domain::model::{BatchReport, Outcome, RecordOutcome, SquareRecord, SquareState};
pub use utils::error::{NegativeInputError, Result, SquareError};
