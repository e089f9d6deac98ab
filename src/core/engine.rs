use crate::core::square::DelayedSquare;
use crate::core::{BatchReport, Computation, SquareRecord};
use crate::utils::error::{Result, SquareError};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Runs independent computations over a batch of inputs.
pub struct SquareEngine<C: Computation + 'static> {
    computation: Arc<C>,
    concurrency: usize,
}

impl SquareEngine<DelayedSquare> {
    pub fn new(concurrency: usize) -> Self {
        Self::with_computation(DelayedSquare::new(), concurrency)
    }
}

impl<C: Computation + 'static> SquareEngine<C> {
    /// `concurrency` is clamped to `1..=Semaphore::MAX_PERMITS`.
    pub fn with_computation(computation: C, concurrency: usize) -> Self {
        Self {
            computation: Arc::new(computation),
            concurrency: concurrency.clamp(1, Semaphore::MAX_PERMITS),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Evaluates every input and returns the records in input order.
    ///
    /// Rejections are recorded in the report; only a failed task is an error.
    pub async fn run(&self, inputs: &[f64]) -> Result<BatchReport> {
        let started_at = Utc::now();
        tracing::info!(
            "Starting batch of {} inputs (concurrency {})",
            inputs.len(),
            self.concurrency
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();

        for (index, &input) in inputs.iter().enumerate() {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| SquareError::TaskError {
                    message: e.to_string(),
                })?;
            let computation = Arc::clone(&self.computation);

            tracing::debug!("Scheduling input #{}: {}", index, input);
            tasks.spawn(async move {
                let outcome = computation.compute(input).await;
                drop(permit);
                (index, input, outcome)
            });
        }

        let mut records = Vec::with_capacity(inputs.len());
        while let Some(joined) = tasks.join_next().await {
            let (index, input, outcome) = joined.map_err(|e| SquareError::TaskError {
                message: format!("computation task failed: {}", e),
            })?;

            match &outcome {
                Ok(value) => tracing::info!("✅ #{} {} -> {}", index, input, value),
                Err(e) => tracing::warn!("❌ #{} {} -> {}", index, input, e),
            }

            records.push(SquareRecord {
                index,
                input,
                outcome: outcome.into(),
            });
        }
        records.sort_by_key(|record| record.index);

        let report = BatchReport {
            started_at,
            finished_at: Utc::now(),
            records,
        };
        tracing::info!(
            "Batch finished: {} resolved, {} rejected",
            report.resolved(),
            report.rejected()
        );

        Ok(report)
    }
}
