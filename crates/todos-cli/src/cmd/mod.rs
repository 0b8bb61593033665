pub mod add;
pub mod clear;
pub mod clear_completed;
pub mod completions;
pub mod count;
pub mod edit;
pub mod export;
pub mod filter;
pub mod import;
pub mod list;
pub mod rm;
pub mod show;
pub mod stats;
pub mod toggle;

use crate::output::{CliError, OutputMode, fail_with};
use crate::validate;
use std::path::Path;
use todos_core::ListManager;
use todos_core::TodoError;
use todos_core::store::FileStore;

/// Open the task list stored under `data_dir` for reading.
pub fn open_list(data_dir: &Path) -> ListManager {
    ListManager::open(FileStore::new(data_dir))
}

/// Open the task list under the directory lock, held until the returned
/// manager is dropped. Mutating commands use this so overlapping `td`
/// invocations apply their changes one after another.
pub fn open_list_for_update(data_dir: &Path, output: OutputMode) -> anyhow::Result<ListManager> {
    match FileStore::new(data_dir).hold_lock() {
        Ok(store) => Ok(ListManager::open(store)),
        Err(err) => Err(fail_with(output, &CliError::from(&TodoError::from(err)))),
    }
}

/// Render a list-operation failure and turn it into a command error.
pub fn fail(output: OutputMode, err: &TodoError) -> anyhow::Result<()> {
    Err(fail_with(output, &CliError::from(err)))
}

/// Resolve a user-supplied id against the list, rendering `not_found` and
/// failing when nothing matches.
pub fn resolve_or_fail(list: &ListManager, raw: &str, output: OutputMode) -> anyhow::Result<String> {
    match validate::resolve_task_id(&list.list(), raw) {
        Ok(Some(id)) => Ok(id),
        Ok(None) => Err(fail_with(output, &CliError::not_found(raw.trim()))),
        Err(err) => Err(fail_with(output, &err)),
    }
}
