//! Argument checks shared by the id-taking commands.

use crate::output::CliError;
use todos_core::TaskRecord;
use todos_core::error::ErrorCode;
use todos_core::id::ID_PREFIX;
use todos_core::validate::validate_id;

const MAX_AMBIGUOUS_LISTED: usize = 5;

/// Reject blank id arguments before touching the list.
pub fn validate_id_arg(raw: &str) -> Result<&str, CliError> {
    validate_id(raw).map_err(|err| {
        let code = err.code();
        CliError::with_details(
            err.to_string(),
            code.hint().unwrap_or_else(|| code.message()),
            code.code(),
        )
    })
}

/// Resolve a (possibly partial) task id to a full id.
///
/// Resolution order:
/// 1. Exact match
/// 2. If the input lacks the "td-" prefix, "td-{input}" exactly
/// 3. Unique prefix match against `td-{input}` (or `{input}` when prefixed)
/// 4. Unique prefix match against the raw input, for ids without "td-"
///
/// Surrounding whitespace in the argument is ignored unless it is part of an
/// exact id. Returns `Ok(None)` when nothing matches.
pub fn resolve_task_id(tasks: &[TaskRecord], input: &str) -> Result<Option<String>, CliError> {
    let raw = validate_id_arg(input)?;
    let input = raw.trim();

    if let Some(task) = tasks.iter().find(|t| t.id == raw || t.id == input) {
        return Ok(Some(task.id.clone()));
    }

    let prefixed = if input.starts_with(ID_PREFIX) {
        input.to_string()
    } else {
        format!("{ID_PREFIX}{input}")
    };

    let mut matches = prefix_matches(tasks, &prefixed);
    if matches.is_empty() && prefixed != input {
        matches = prefix_matches(tasks, input);
    }

    match matches.as_slice() {
        [] => Ok(None),
        [only] => Ok(Some((*only).to_string())),
        many => {
            let mut listed = many.to_vec();
            listed.sort_unstable();
            listed.truncate(MAX_AMBIGUOUS_LISTED);
            Err(CliError::with_details(
                format!(
                    "ambiguous task id prefix '{input}'; matches: {}",
                    listed.join(", ")
                ),
                "type more characters of the id",
                ErrorCode::TaskNotFound.code(),
            ))
        }
    }
}

fn prefix_matches<'a>(tasks: &'a [TaskRecord], prefix: &str) -> Vec<&'a str> {
    tasks
        .iter()
        .map(|t| t.id.as_str())
        .filter(|id| id.starts_with(prefix))
        .collect()
}
