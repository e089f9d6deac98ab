pub mod engine;
pub mod square;

pub use crate::domain::model::{BatchReport, Outcome, RecordOutcome, SquareRecord, SquareState};
pub use crate::domain::ports::{Computation, ConfigProvider, Storage};
pub use crate::utils::error::Result;
