use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;

use super::{HistoryRecord, HistoryStore, NewHistoryRecord, StorageError};

/// In-process history store. Records are lost when the process exits.
#[derive(Default)]
pub struct MemoryHistoryStore {
    records: Mutex<Vec<HistoryRecord>>,
    unavailable: AtomicBool,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the backend going away (or coming back).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory store offline".to_string()));
        }
        Ok(())
    }

    fn records(&self) -> Result<std::sync::MutexGuard<'_, Vec<HistoryRecord>>, StorageError> {
        self.records
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn append(&self, record: NewHistoryRecord) -> Result<HistoryRecord, StorageError> {
        self.check_available()?;
        let mut records = self.records()?;
        let id = records.len() as i64 + 1;
        let record = record.into_record(id);
        records.push(record.clone());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<HistoryRecord>, StorageError> {
        self.check_available()?;
        let mut records = self.records()?.clone();
        records.sort_by(|a, b| {
            b.recorded_at
                .cmp(&a.recorded_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }
}
