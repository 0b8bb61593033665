//! The in-memory task list and every operation on it.
//!
//! [`ListManager`] owns the ordered collection and the active [`Filter`].
//! Mutations are write-ahead: the next state is built, handed to the
//! [`Store`], and only committed to memory once the store accepted it. A
//! [`StorageError`](crate::error::StorageError) therefore leaves the list
//! exactly as it was before the call.

use serde::Serialize;
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::codec;
use crate::error::{ErrorCode, Result, TodoError};
use crate::id::generate_id;
use crate::model::{Filter, Stats, TaskPatch, TaskRecord};
use crate::store::Store;
use crate::validate::{validate_id, validate_text};

/// Outcome of an import: how many entries were kept and how many dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Owner of the task collection for one session.
pub struct ListManager {
    tasks: Vec<TaskRecord>,
    filter: Filter,
    store: Option<Box<dyn Store>>,
    clock: Box<dyn Clock>,
}

impl Default for ListManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ListManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListManager")
            .field("tasks", &self.tasks)
            .field("filter", &self.filter)
            .field("persistent", &self.store.is_some())
            .finish_non_exhaustive()
    }
}

impl ListManager {
    /// Empty list with no persistence.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            filter: Filter::default(),
            store: None,
            clock: Box::new(SystemClock),
        }
    }

    /// Load records and filter from `store` and persist through it from now on.
    ///
    /// Never fails: absent or corrupt stored data yields an empty list.
    pub fn open(store: impl Store + 'static) -> Self {
        let tasks = store.load_records();
        let filter = store.load_filter();
        debug!(tasks = tasks.len(), %filter, "loaded task list");
        Self {
            tasks,
            filter,
            store: Some(Box::new(store)),
            clock: Box::new(SystemClock),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Create a task from `text` and append it.
    ///
    /// # Errors
    ///
    /// Validation errors for blank or over-long text; storage errors when
    /// the new list cannot be saved.
    pub fn add(&mut self, text: &str) -> Result<TaskRecord> {
        let text = validate_text(text)?;
        let id = generate_id(&mut rand::thread_rng(), |candidate| {
            self.position(candidate).is_some()
        });
        let record = TaskRecord::new(id, text, self.clock.now());

        let mut next = self.tasks.clone();
        next.push(record.clone());
        self.commit_tasks(next)?;

        debug!(id = %record.id, "added task");
        Ok(record)
    }

    /// Copy of every task in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<TaskRecord> {
        self.tasks.clone()
    }

    /// Copy of the tasks visible under the active filter.
    #[must_use]
    pub fn list_filtered(&self) -> Vec<TaskRecord> {
        self.tasks
            .iter()
            .filter(|task| self.filter.matches(task))
            .cloned()
            .collect()
    }

    /// Look a task up by id.
    ///
    /// # Errors
    ///
    /// Validation error when `id` is blank.
    pub fn get(&self, id: &str) -> Result<Option<TaskRecord>> {
        let id = validate_id(id)?;
        Ok(self.position(id).map(|index| self.tasks[index].clone()))
    }

    /// Apply `patch` to the task with `id`. Returns `None` for an unknown id,
    /// in which case nothing is written.
    ///
    /// # Errors
    ///
    /// Validation errors for a blank id or invalid replacement text; storage
    /// errors when the change cannot be saved.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<Option<TaskRecord>> {
        let id = validate_id(id)?;
        let empty = patch.is_empty();
        let text = patch.text.as_deref().map(validate_text).transpose()?;
        let Some(index) = self.position(id) else {
            debug!(id, "update of unknown task ignored");
            return Ok(None);
        };

        let mut next = self.tasks.clone();
        let task = &mut next[index];
        if let Some(text) = text {
            task.text = text;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        task.touch(self.clock.now());
        let updated = task.clone();
        self.commit_tasks(next)?;

        debug!(id = %updated.id, completed = updated.completed, empty, "updated task");
        Ok(Some(updated))
    }

    /// Flip the completed flag of the task with `id`.
    ///
    /// # Errors
    ///
    /// Same as [`ListManager::update`].
    pub fn toggle(&mut self, id: &str) -> Result<Option<TaskRecord>> {
        let id = validate_id(id)?;
        let Some(index) = self.position(id) else {
            return Ok(None);
        };
        let completed = !self.tasks[index].completed;
        self.update(id, TaskPatch::completed(completed))
    }

    /// Delete the task with `id`. Returns whether a task was removed.
    ///
    /// # Errors
    ///
    /// Validation error for a blank id; storage error when the shorter list
    /// cannot be saved.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let id = validate_id(id)?;
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        let mut next = self.tasks.clone();
        next.remove(index);
        self.commit_tasks(next)?;

        debug!(id, "removed task");
        Ok(true)
    }

    /// Delete every completed task. Persists even when none were removed.
    ///
    /// # Errors
    ///
    /// Storage error when the list cannot be saved.
    pub fn remove_completed(&mut self) -> Result<usize> {
        let next: Vec<TaskRecord> = self
            .tasks
            .iter()
            .filter(|task| !task.completed)
            .cloned()
            .collect();
        let removed = self.tasks.len() - next.len();
        self.commit_tasks(next)?;

        debug!(removed, "removed completed tasks");
        Ok(removed)
    }

    /// Make `filter` the active filter and persist the preference.
    ///
    /// # Errors
    ///
    /// Storage error when the preference cannot be saved; the previous
    /// filter stays active.
    pub fn set_filter(&mut self, filter: Filter) -> Result<()> {
        if let Some(store) = &self.store {
            store.save_filter(filter)?;
        }
        self.filter = filter;
        debug!(%filter, "set filter");
        Ok(())
    }

    /// Parse and apply a filter literal.
    ///
    /// # Errors
    ///
    /// Validation error for anything other than `all`, `completed`, or
    /// `pending`; storage error as in [`ListManager::set_filter`].
    pub fn set_filter_str(&mut self, raw: &str) -> Result<Filter> {
        let filter: Filter = raw.parse()?;
        self.set_filter(filter)?;
        Ok(filter)
    }

    #[must_use]
    pub const fn filter(&self) -> Filter {
        self.filter
    }

    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats::from_tasks(&self.tasks)
    }

    /// Remove every task and persist the empty list. The filter is kept.
    ///
    /// # Errors
    ///
    /// Storage error when the empty list cannot be saved.
    pub fn clear(&mut self) -> Result<()> {
        let cleared = self.tasks.len();
        self.commit_tasks(Vec::new())?;
        debug!(cleared, "cleared task list");
        Ok(())
    }

    /// Drop all stored state, tasks and filter preference alike.
    ///
    /// # Errors
    ///
    /// Storage error when the store cannot remove its entries.
    pub fn reset(&mut self) -> Result<()> {
        if let Some(store) = &self.store {
            store.clear()?;
        }
        self.tasks.clear();
        self.filter = Filter::default();
        info!("reset task list and filter");
        Ok(())
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Pretty-printed JSON array of every task, timestamps included.
    ///
    /// # Errors
    ///
    /// Generic error if serialization fails.
    pub fn export_all(&self) -> Result<String> {
        codec::encode_records_pretty(&self.tasks).map_err(|err| {
            TodoError::other("failed to export tasks", ErrorCode::InternalUnexpected, err)
        })
    }

    /// Replace the whole list with the well-formed entries of `text`.
    /// Returns how many tasks were imported.
    ///
    /// # Errors
    ///
    /// See [`ListManager::import_with_report`].
    pub fn import_all(&mut self, text: &str) -> Result<usize> {
        self.import_with_report(text).map(|report| report.imported)
    }

    /// Like [`ListManager::import_all`], also reporting skipped entries.
    ///
    /// # Errors
    ///
    /// Generic error when `text` is not a JSON array; storage error when the
    /// imported list cannot be saved.
    pub fn import_with_report(&mut self, text: &str) -> Result<ImportReport> {
        let decoded = codec::decode_records(text).map_err(|err| {
            TodoError::other("failed to import tasks", ErrorCode::ImportMalformed, err)
        })?;
        let report = ImportReport {
            imported: decoded.tasks.len(),
            skipped: decoded.skipped,
        };
        self.commit_tasks(decoded.tasks)?;

        info!(imported = report.imported, skipped = report.skipped, "imported tasks");
        Ok(report)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    fn commit_tasks(&mut self, next: Vec<TaskRecord>) -> Result<()> {
        if let Some(store) = &self.store {
            store.save_records(&next)?;
        }
        self.tasks = next;
        Ok(())
    }
}
