use std::collections::HashMap;
use std::io;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{FILTER_KEY, RECORDS_KEY, Store, encode_entry, filter_from_entry, records_from_entry};
use crate::error::StorageError;
use crate::model::{Filter, TaskRecord};

/// In-memory key-value store. Clones share the same entries, so a test can
/// keep a handle to inspect what the manager wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<&'static str, String>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write or clear fail with a [`StorageError`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.write().fail_writes = fail;
    }

    /// Number of successful writes (saves and clears) so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.read().writes
    }

    /// Raw text of an entry, if present.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<String> {
        self.read().entries.get(key).cloned()
    }

    /// Seed an entry with arbitrary text, bypassing encoding.
    pub fn put_raw(&self, key: &'static str, value: impl Into<String>) {
        self.write().entries.insert(key, value.into());
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn store_entry(&self, key: &'static str, value: String) -> Result<(), StorageError> {
        let mut state = self.write();
        if state.fail_writes {
            return Err(StorageError::Write {
                key,
                source: injected_failure(),
            });
        }
        state.entries.insert(key, value);
        state.writes += 1;
        Ok(())
    }
}

fn injected_failure() -> io::Error {
    io::Error::other("memory store is configured to fail writes")
}

impl Store for MemoryStore {
    fn load_records(&self) -> Vec<TaskRecord> {
        records_from_entry(self.read().entries.get(RECORDS_KEY).map(String::as_str))
    }

    fn save_records(&self, tasks: &[TaskRecord]) -> Result<(), StorageError> {
        let encoded = encode_entry(tasks)?;
        self.store_entry(RECORDS_KEY, encoded)
    }

    fn load_filter(&self) -> Filter {
        filter_from_entry(self.read().entries.get(FILTER_KEY).map(String::as_str))
    }

    fn save_filter(&self, filter: Filter) -> Result<(), StorageError> {
        self.store_entry(FILTER_KEY, crate::codec::encode_filter(filter).to_string())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut state = self.write();
        if state.fail_writes {
            return Err(StorageError::Remove {
                key: RECORDS_KEY,
                source: injected_failure(),
            });
        }
        state.entries.clear();
        state.writes += 1;
        Ok(())
    }
}
