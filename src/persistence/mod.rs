//! Record lookup used by object placeholders.
//!
//! # Responsibilities
//! - Define what a persisted domain record is (`Record`)
//! - Look records up by primary key (`RecordProvider`)
//! - Provide an in-memory provider for tests and demos
//!
//! # Design Decisions
//! - Lookups are synchronous; callers run them off the async runtime
//! - A missing record is `Ok(None)`, not an error

use dashmap::DashMap;
use thiserror::Error;

/// Errors raised by a record provider.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("record lookup failed: {0}")]
    Lookup(String),

    #[error("persistence backend unavailable: {0}")]
    Unavailable(String),
}

/// A domain record. `Default` is the empty record bound when a key is unknown.
pub trait Record: Default + Clone + Send + Sync + 'static {}

/// Finds records of one type by primary key.
pub trait RecordProvider<T: Record>: Send + Sync {
    fn find(&self, primary_key: &str) -> Result<Option<T>, PersistenceError>;
}

/// Records kept in memory, keyed by primary key.
#[derive(Debug)]
pub struct MemoryProvider<T> {
    records: DashMap<String, T>,
}

impl<T: Record> MemoryProvider<T> {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Store a record, returning the one it replaced.
    pub fn insert(&self, primary_key: impl Into<String>, record: T) -> Option<T> {
        self.records.insert(primary_key.into(), record)
    }

    pub fn remove(&self, primary_key: &str) -> Option<T> {
        self.records.remove(primary_key).map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Record> Default for MemoryProvider<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> RecordProvider<T> for MemoryProvider<T> {
    fn find(&self, primary_key: &str) -> Result<Option<T>, PersistenceError> {
        Ok(self.records.get(primary_key).map(|r| r.value().clone()))
    }
}
