use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::progress::ProgressTotals;

use super::StorageError;

/// A completed round as stored in the `progress` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub recorded_at: DateTime<Utc>,
    pub difficulty: String,
    pub correct_answers: u32,
    pub total_attempts: u32,
}

impl HistoryRecord {
    pub fn totals(&self) -> ProgressTotals {
        ProgressTotals {
            correct_answers: self.correct_answers,
            total_attempts: self.total_attempts,
        }
    }
}

/// A record that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistoryRecord {
    pub recorded_at: DateTime<Utc>,
    pub difficulty: String,
    pub totals: ProgressTotals,
}

impl NewHistoryRecord {
    pub fn into_record(self, id: i64) -> HistoryRecord {
        HistoryRecord {
            id,
            recorded_at: self.recorded_at,
            difficulty: self.difficulty,
            correct_answers: self.totals.correct_answers,
            total_attempts: self.totals.total_attempts,
        }
    }
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Corrupt(format!("bad timestamp {s:?}: {e}")))
}
