//! In-memory profile slot

use super::{PersistError, ProfileStore};

/// Keeps the record in memory; counts writes so callers can observe saves
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing raw record (possibly corrupt)
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Some(record.into()),
            writes: 0,
        }
    }

    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }

    /// Number of saves performed
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ProfileStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, PersistError> {
        Ok(self.record.clone())
    }

    fn write(&mut self, record: &str) -> Result<(), PersistError> {
        self.record = Some(record.to_string());
        self.writes += 1;
        Ok(())
    }
}
