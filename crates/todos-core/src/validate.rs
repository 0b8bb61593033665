//! Input rules shared by every entry point that accepts task text or ids.

use crate::error::ValidationError;

pub const MAX_TEXT_LEN: usize = 200;

/// Collapse whitespace runs to single spaces and trim the edges.
#[must_use]
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize `raw` and check it against the length rules.
///
/// Length is counted in characters, not bytes.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyText`] for blank input and
/// [`ValidationError::TextTooLong`] past [`MAX_TEXT_LEN`].
pub fn validate_text(raw: &str) -> Result<String, ValidationError> {
    let text = normalize_text(raw);
    if text.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    let len = text.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(ValidationError::TextTooLong {
            len,
            max: MAX_TEXT_LEN,
        });
    }
    Ok(text)
}

/// Reject blank ids. Non-blank ids are returned unchanged; lookups compare
/// them by exact equality.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyId`] when `raw` is empty or whitespace.
pub fn validate_id(raw: &str) -> Result<&str, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::EmptyId);
    }
    Ok(raw)
}

/// Parse a textual completed flag.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidCompleted`] for anything that is not a
/// recognizable boolean.
pub fn parse_completed(raw: &str) -> Result<bool, ValidationError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "on" | "done" => Ok(true),
        "false" | "no" | "n" | "0" | "off" | "pending" => Ok(false),
        _ => Err(ValidationError::InvalidCompleted(raw.to_string())),
    }
}
