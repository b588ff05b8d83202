use async_trait::async_trait;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use super::{
    HistoryStore, StorageError,
    models::{HistoryRecord, NewHistoryRecord, format_timestamp, parse_timestamp},
};

/// History store backed by the SQLite `progress` table
#[derive(Clone)]
pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

impl SqliteHistoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn u32_column(row: &SqliteRow, column: &'static str) -> Result<u32, StorageError> {
    let v: i64 = row.try_get(column)?;
    u32::try_from(v).map_err(|_| StorageError::Corrupt(format!("invalid {column}: {v}")))
}

fn map_row(row: &SqliteRow) -> Result<HistoryRecord, StorageError> {
    let timestamp: String = row.try_get("timestamp")?;

    Ok(HistoryRecord {
        id: row.try_get("id")?,
        recorded_at: parse_timestamp(&timestamp)?,
        difficulty: row.try_get("difficulty")?,
        correct_answers: u32_column(row, "correct_answers")?,
        total_attempts: u32_column(row, "total_attempts")?,
    })
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn append(&self, record: NewHistoryRecord) -> Result<HistoryRecord, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO progress (timestamp, difficulty, correct_answers, total_attempts)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(format_timestamp(record.recorded_at))
        .bind(record.difficulty.as_str())
        .bind(i64::from(record.totals.correct_answers))
        .bind(i64::from(record.totals.total_attempts))
        .execute(&self.pool)
        .await?;

        Ok(record.into_record(result.last_insert_rowid()))
    }

    async fn list_all(&self) -> Result<Vec<HistoryRecord>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT id, timestamp, difficulty, correct_answers, total_attempts
            FROM progress
            ORDER BY timestamp DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row).collect()
    }
}
