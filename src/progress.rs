//! Running tally of correct answers versus attempts.

use serde::Serialize;

/// Immutable copy of accumulated progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressTotals {
    pub correct_answers: u32,
    pub total_attempts: u32,
}

impl ProgressTotals {
    /// Percentage of correct answers, or 0 when nothing was attempted.
    pub fn accuracy(&self) -> f64 {
        if self.total_attempts == 0 {
            0.0
        } else {
            (self.correct_answers as f64 / self.total_attempts as f64) * 100.0
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProgressAccumulator {
    totals: ProgressTotals,
}

impl ProgressAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score one answer. Returns whether it was correct.
    pub fn record_answer(&mut self, submitted: i64, expected: i64) -> bool {
        let correct = submitted == expected;
        self.totals.total_attempts = self.totals.total_attempts.saturating_add(1);
        if correct {
            self.totals.correct_answers = self.totals.correct_answers.saturating_add(1);
        }
        correct
    }

    pub fn snapshot(&self) -> ProgressTotals {
        self.totals
    }
}
