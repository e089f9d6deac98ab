use crate::core::{Computation, Outcome, SquareState};
use crate::utils::error::{NegativeInputError, Result, SquareError};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Fixed wait between invocation and outcome.
pub const SQUARE_DELAY: Duration = Duration::from_millis(1000);

/// Squares `n` once [`SQUARE_DELAY`] has elapsed.
///
/// Negative inputs are rejected with [`NegativeInputError`]. The sign check
/// is `n >= 0.0`, so `0.0` and `-0.0` resolve to zero and NaN is rejected.
/// The timer always runs to completion before the outcome is produced.
pub async fn compute(n: f64) -> Outcome {
    tokio::time::sleep(SQUARE_DELAY).await;
    if n >= 0.0 {
        Ok(n * n)
    } else {
        Err(NegativeInputError)
    }
}

/// Schedules [`compute`] on the current tokio runtime.
///
/// Must be called from within a runtime context.
pub fn spawn(n: f64) -> PendingSquare {
    let (tx, rx) = watch::channel(SquareState::Pending);
    let handle = tokio::spawn(async move {
        let outcome = compute(n).await;
        tracing::debug!("square({}) settled: {:?}", n, outcome);
        tx.send_replace(outcome.into());
        outcome
    });

    PendingSquare {
        input: n,
        state: rx,
        handle,
    }
}

/// Handle to a square scheduled with [`spawn`].
#[derive(Debug)]
pub struct PendingSquare {
    input: f64,
    state: watch::Receiver<SquareState>,
    handle: JoinHandle<Outcome>,
}

impl PendingSquare {
    pub fn input(&self) -> f64 {
        self.input
    }

    /// Current state without waiting.
    pub fn state(&self) -> SquareState {
        self.state.borrow().clone()
    }

    /// Waits until the state leaves `Pending`.
    pub async fn settled(&mut self) -> SquareState {
        let settled = self
            .state
            .wait_for(SquareState::is_terminal)
            .await
            .map(|state| state.clone());
        match settled {
            Ok(state) => state,
            // sender gone without settling: the task was aborted
            Err(_) => self.state.borrow().clone(),
        }
    }

    /// Waits for the outcome. The outer error only reports a task that was
    /// cancelled or panicked, never a rejection.
    pub async fn outcome(self) -> Result<Outcome> {
        let input = self.input;
        self.handle.await.map_err(|e| SquareError::TaskError {
            message: format!("square({}) did not complete: {}", input, e),
        })
    }
}

/// [`Computation`] backed by [`compute`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DelayedSquare;

impl DelayedSquare {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Computation for DelayedSquare {
    async fn compute(&self, input: f64) -> Outcome {
        compute(input).await
    }
}
