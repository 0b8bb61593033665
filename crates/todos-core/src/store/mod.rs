//! Persistence contract between the list manager and durable storage.
//!
//! Storage is modelled as a key-value text store with two independent
//! entries: [`RECORDS_KEY`] holds the JSON record array and [`FILTER_KEY`]
//! holds the filter literal. Loads never fail; a missing or unreadable entry
//! falls back to an empty list or [`Filter::All`]. Writes surface
//! [`StorageError`].

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;
use crate::model::{Filter, TaskRecord};

pub const RECORDS_KEY: &str = "todos";
pub const FILTER_KEY: &str = "todo-filter";

/// Durable storage used by [`crate::manager::ListManager`].
pub trait Store {
    /// Stored records, or an empty list when absent or corrupt.
    fn load_records(&self) -> Vec<TaskRecord>;

    /// Replace the stored records with `tasks`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the underlying write fails.
    fn save_records(&self, tasks: &[TaskRecord]) -> Result<(), StorageError>;

    /// Stored filter, or [`Filter::All`] when absent or invalid.
    fn load_filter(&self) -> Filter;

    /// Replace the stored filter preference.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the underlying write fails.
    fn save_filter(&self, filter: Filter) -> Result<(), StorageError>;

    /// Remove both entries.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when an entry cannot be removed.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Decode a stored records entry, logging instead of failing.
fn records_from_entry(raw: Option<&str>) -> Vec<TaskRecord> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match crate::codec::decode_records(raw) {
        Ok(decoded) => {
            if decoded.skipped > 0 {
                tracing::warn!(
                    key = RECORDS_KEY,
                    skipped = decoded.skipped,
                    "dropped malformed stored tasks"
                );
            }
            decoded.tasks
        }
        Err(err) => {
            tracing::warn!(key = RECORDS_KEY, error = %err, "stored tasks are corrupt, starting empty");
            Vec::new()
        }
    }
}

fn filter_from_entry(raw: Option<&str>) -> Filter {
    let Some(raw) = raw else {
        return Filter::default();
    };
    crate::codec::decode_filter(raw).unwrap_or_else(|| {
        tracing::warn!(key = FILTER_KEY, value = raw, "stored filter is invalid, using all");
        Filter::default()
    })
}

fn encode_entry(tasks: &[TaskRecord]) -> Result<String, StorageError> {
    crate::codec::encode_records(tasks).map_err(|source| StorageError::Encode {
        key: RECORDS_KEY,
        source,
    })
}
