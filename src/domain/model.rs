use crate::utils::error::NegativeInputError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of a single delayed square.
pub type Outcome = std::result::Result<f64, NegativeInputError>;

/// Observable state of a scheduled square. Leaves `Pending` exactly once.
#[derive(Debug, Clone, PartialEq)]
pub enum SquareState {
    Pending,
    Resolved(f64),
    Rejected(String),
}

impl SquareState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SquareState::Pending)
    }
}

impl From<Outcome> for SquareState {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Ok(value) => SquareState::Resolved(value),
            Err(e) => SquareState::Rejected(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RecordOutcome {
    Resolved { value: f64 },
    Rejected { message: String },
}

impl From<Outcome> for RecordOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Ok(value) => RecordOutcome::Resolved { value },
            Err(e) => RecordOutcome::Rejected {
                message: e.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquareRecord {
    pub index: usize,
    pub input: f64,
    pub outcome: RecordOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub records: Vec<SquareRecord>,
}

impl BatchReport {
    pub fn resolved(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, RecordOutcome::Resolved { .. }))
            .count()
    }

    pub fn rejected(&self) -> usize {
        self.records.len() - self.resolved()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// One line per input, followed by a summary line.
    pub fn to_text(&self) -> String {
        let mut lines: Vec<String> = self
            .records
            .iter()
            .map(|record| match &record.outcome {
                RecordOutcome::Resolved { value } => format!("{} -> {}", record.input, value),
                RecordOutcome::Rejected { message } => format!("{} -> {}", record.input, message),
            })
            .collect();
        lines.push(format!(
            "{} resolved, {} rejected",
            self.resolved(),
            self.rejected()
        ));
        lines.join("\n")
    }
}
