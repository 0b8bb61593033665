use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::{FILTER_KEY, RECORDS_KEY, Store, encode_entry, filter_from_entry, records_from_entry};
use crate::error::StorageError;
use crate::lock::StoreLock;
use crate::model::{Filter, TaskRecord};

pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);
const LOCK_FILE: &str = ".lock";

/// Directory-backed store: one file per entry.
///
/// Writes go to a sibling temp file that is renamed into place while holding
/// the directory lock, so readers see either the old or the new entry.
///
/// A store returned by [`FileStore::hold_lock`] keeps the lock until its last
/// clone is dropped. Load, modify and save then happen as one unit and
/// overlapping sessions on the same directory run one after another.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    lock_timeout: Duration,
    held: Option<Arc<StoreLock>>,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            held: None,
        }
    }

    #[must_use]
    pub const fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Take the directory lock for the lifetime of this store.
    ///
    /// Creates the directory when needed. Writes through the returned store
    /// do not lock again.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Lock`] when another session keeps the lock
    /// past the configured timeout.
    pub fn hold_lock(mut self) -> Result<Self, StorageError> {
        if self.held.is_none() {
            let lock = self.acquire()?;
            debug!(dir = %self.dir().display(), lock = %lock.path().display(), "holding store lock");
            self.held = Some(Arc::new(lock));
        }
        Ok(self)
    }

    /// Filesystem location of a store entry.
    #[must_use]
    pub fn entry_path(&self, key: &str) -> PathBuf {
        if key == RECORDS_KEY {
            self.dir.join(format!("{key}.json"))
        } else {
            self.dir.join(key)
        }
    }

    fn read_entry(&self, key: &str) -> Option<String> {
        let path = self.entry_path(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read store entry");
                None
            }
        }
    }

    fn acquire(&self) -> Result<StoreLock, StorageError> {
        Ok(StoreLock::acquire(
            &self.dir.join(LOCK_FILE),
            self.lock_timeout,
        )?)
    }

    /// Per-write lock, skipped when the session already holds one.
    fn lock(&self) -> Result<Option<StoreLock>, StorageError> {
        if self.held.is_some() {
            return Ok(None);
        }
        self.acquire().map(Some)
    }

    fn write_entry(&self, key: &'static str, contents: &str) -> Result<(), StorageError> {
        let to_storage = |source: io::Error| StorageError::Write { key, source };

        fs::create_dir_all(&self.dir).map_err(to_storage)?;
        let _lock = self.lock()?;

        let path = self.entry_path(key);
        let tmp = path.with_extension("tmp");
        let mut file = fs::File::create(&tmp).map_err(to_storage)?;
        file.write_all(contents.as_bytes()).map_err(to_storage)?;
        file.sync_all().map_err(to_storage)?;
        drop(file);
        fs::rename(&tmp, &path).map_err(to_storage)?;

        debug!(path = %path.display(), bytes = contents.len(), "wrote store entry");
        Ok(())
    }

    fn remove_entry(&self, key: &'static str) -> Result<(), StorageError> {
        let path = self.entry_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Remove { key, source }),
        }
    }
}

impl Store for FileStore {
    fn load_records(&self) -> Vec<TaskRecord> {
        records_from_entry(self.read_entry(RECORDS_KEY).as_deref())
    }

    fn save_records(&self, tasks: &[TaskRecord]) -> Result<(), StorageError> {
        let encoded = encode_entry(tasks)?;
        self.write_entry(RECORDS_KEY, &encoded)
    }

    fn load_filter(&self) -> Filter {
        filter_from_entry(self.read_entry(FILTER_KEY).as_deref())
    }

    fn save_filter(&self, filter: Filter) -> Result<(), StorageError> {
        self.write_entry(FILTER_KEY, crate::codec::encode_filter(filter))
    }

    fn clear(&self) -> Result<(), StorageError> {
        if !self.dir.exists() {
            return Ok(());
        }
        let _lock = self.lock()?;
        self.remove_entry(RECORDS_KEY)?;
        self.remove_entry(FILTER_KEY)
    }
}
