//! Turns expired rounds into durable history records.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::{
    clock::Clock,
    db::{HistoryRecord, HistoryStore, NewHistoryRecord},
    error::QuizResult,
    progress::ProgressTotals,
};

#[derive(Clone)]
pub struct HistoryRecorder {
    store: Arc<dyn HistoryStore>,
    clock: Clock,
}

impl HistoryRecorder {
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self {
            store,
            clock: Clock::System,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub async fn record(
        &self,
        difficulty: &str,
        totals: ProgressTotals,
    ) -> QuizResult<HistoryRecord> {
        self.record_at(difficulty, totals, self.clock.now()).await
    }

    /// Append a record stamped with `recorded_at`. Storage failures propagate.
    pub async fn record_at(
        &self,
        difficulty: &str,
        totals: ProgressTotals,
        recorded_at: DateTime<Utc>,
    ) -> QuizResult<HistoryRecord> {
        let new_record = NewHistoryRecord {
            recorded_at,
            difficulty: difficulty.to_string(),
            totals,
        };

        match self.store.append(new_record).await {
            Ok(record) => {
                info!(
                    id = record.id,
                    difficulty = %record.difficulty,
                    correct = record.correct_answers,
                    total = record.total_attempts,
                    "Round recorded"
                );
                Ok(record)
            }
            Err(e) => {
                warn!(difficulty, error = %e, "Failed to record round");
                Err(e.into())
            }
        }
    }

    /// Every recorded round, most recent first.
    pub async fn list_all(&self) -> QuizResult<Vec<HistoryRecord>> {
        Ok(self.store.list_all().await?)
    }
}
