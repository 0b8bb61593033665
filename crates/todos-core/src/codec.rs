//! Text encoding of the task collection and filter preference.
//!
//! The same JSON array layout is used for the store entry, for `export`, and
//! for `import`:
//!
//! ```json
//! [{"id":"td-k3j9a0","text":"Buy milk","completed":false,
//!   "createdAt":"2026-10-19T09:30:00.123Z","updatedAt":"2026-10-19T09:30:00.123Z"}]
//! ```
//!
//! Decoding is tolerant per element and strict at the top level: anything
//! other than an array is an error, while elements that do not have the
//! record shape (or would break a record invariant) are skipped and counted.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use crate::model::{Filter, TaskRecord};
use crate::validate::{validate_id, validate_text};

/// Top-level decode failure.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of tasks, found {found}")]
    NotArray { found: &'static str },
}

/// Records recovered from a text blob.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    pub tasks: Vec<TaskRecord>,
    pub skipped: usize,
}

/// Compact form written to the store.
///
/// # Errors
///
/// Propagates `serde_json` serialization failures.
pub fn encode_records(tasks: &[TaskRecord]) -> serde_json::Result<String> {
    serde_json::to_string(tasks)
}

/// Human-readable form produced by export.
///
/// # Errors
///
/// Propagates `serde_json` serialization failures.
pub fn encode_records_pretty(tasks: &[TaskRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(tasks)
}

/// Parse a record array, dropping malformed elements.
///
/// An element survives when it deserializes as a [`TaskRecord`] (string `id`
/// and `text`, boolean `completed`, ISO-8601 `createdAt`/`updatedAt`), its id
/// is non-blank and not already seen, and its text passes the add rules.
/// Surviving text is normalized and `updatedAt` is clamped to `createdAt`.
///
/// # Errors
///
/// Returns [`DecodeError`] when `text` is not JSON or not an array.
pub fn decode_records(text: &str) -> Result<Decoded, DecodeError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(elements) = value else {
        return Err(DecodeError::NotArray {
            found: json_kind(&value),
        });
    };

    let mut seen = HashSet::new();
    let mut decoded = Decoded::default();
    for element in elements {
        match sanitize(element, &mut seen) {
            Some(task) => decoded.tasks.push(task),
            None => decoded.skipped += 1,
        }
    }
    Ok(decoded)
}

fn sanitize(element: Value, seen: &mut HashSet<String>) -> Option<TaskRecord> {
    let mut task: TaskRecord = serde_json::from_value(element).ok()?;
    validate_id(&task.id).ok()?;
    let text = validate_text(&task.text).ok()?;
    if !seen.insert(task.id.clone()) {
        return None;
    }
    task.text = text;
    task.updated_at = task.updated_at.max(task.created_at);
    Some(task)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Stored filter literal. Accepts a bare or JSON-quoted value.
#[must_use]
pub fn decode_filter(text: &str) -> Option<Filter> {
    let trimmed = text.trim();
    let bare = trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(trimmed);
    bare.parse().ok()
}

#[must_use]
pub const fn encode_filter(filter: Filter) -> &'static str {
    filter.as_str()
}
