//! Shared output layer for pretty/text/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: pretty output for humans, compact text for scripts, or stable
//! JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` / `--json` flag
//! 2. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. `output` in the user config file
//! 4. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.

use chrono::Local;
use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use todos_core::TaskRecord;
use todos_core::config::normalize_output_mode;
use todos_core::error::{ErrorCode, TodoError};

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<12} {}", format!("{key}:"), value.as_ref())
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (checkboxes, sections, visual framing).
    Pretty,
    /// Plain tab-free rows for scripts and pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    fn from_name(name: &str) -> Option<Self> {
        match normalize_output_mode(name)? {
            "json" => Some(Self::Json),
            "text" => Some(Self::Text),
            _ => Some(Self::Pretty),
        }
    }
}

/// Core resolution logic, separated from I/O for testability.
fn resolve_output_mode_inner(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    format_env: Option<&str>,
    config_output: Option<&str>,
    is_tty: bool,
) -> OutputMode {
    if let Some(mode) = format_flag {
        return mode;
    }

    if json_flag {
        return OutputMode::Json;
    }

    // Unknown values fall through to the next source.
    if let Some(mode) = format_env.and_then(OutputMode::from_name) {
        return mode;
    }

    if let Some(mode) = config_output.and_then(OutputMode::from_name) {
        return mode;
    }

    if is_tty {
        OutputMode::Pretty
    } else {
        OutputMode::Text
    }
}

/// Resolve the output mode from CLI flags, environment, config, and TTY defaults.
pub fn resolve_output_mode(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    config_output: Option<&str>,
) -> OutputMode {
    let env_val = std::env::var("FORMAT").ok();
    let is_tty = io::stdout().is_terminal();
    resolve_output_mode_inner(
        format_flag,
        json_flag,
        env_val.as_deref(),
        config_output,
        is_tty,
    )
}

/// Trait implemented by any CLI result type that can be rendered in all modes.
pub trait Renderable {
    /// Render for human consumption.
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Render as a self-contained JSON value.
    fn render_json(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Render as a single text row, columns matching [`Renderable::table_headers`].
    fn render_table(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Column headers for text mode. Default: no header.
    fn table_headers() -> &'static [&'static str]
    where
        Self: Sized,
    {
        &[]
    }
}

const fn checkbox(completed: bool) -> &'static str {
    if completed { "[x]" } else { "[ ]" }
}

pub const fn status_word(completed: bool) -> &'static str {
    if completed { "done" } else { "pending" }
}

/// Timestamp in the local zone for human output.
pub fn local_time(ts: chrono::DateTime<chrono::Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

impl Renderable for TaskRecord {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{} {}  {}", checkbox(self.completed), self.id, self.text)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *w, self)?;
        Ok(())
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {}  {}",
            self.id,
            status_word(self.completed),
            self.text
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["ID", "STATUS", "TEXT"]
    }
}

/// Render a single [`Renderable`] item to stdout using the given output mode.
pub fn render_item<R: Renderable>(item: &R, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_item(&mut out, item, mode)
}

fn write_item<R: Renderable>(out: &mut dyn Write, item: &R, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Pretty => item.render_human(out),
        OutputMode::Text => item.render_table(out),
        OutputMode::Json => {
            item.render_json(out)?;
            writeln!(out)
        }
    }
}

/// Write rows for a list of [`Renderable`] items in pretty or text mode.
///
/// JSON callers wrap their items in a payload and use [`render`] instead.
pub fn write_rows<R: Renderable>(
    out: &mut dyn Write,
    items: &[R],
    mode: OutputMode,
) -> io::Result<()> {
    match mode {
        OutputMode::Pretty => {
            for item in items {
                item.render_human(out)?;
            }
        }
        OutputMode::Text | OutputMode::Json => {
            if !items.is_empty() {
                writeln!(out, "{}", R::table_headers().join("  "))?;
            }
            for item in items {
                item.render_table(out)?;
            }
        }
    }
    Ok(())
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (e.g. "E1001").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Broad error kind: "validation", "storage", or "other".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

impl CliError {
    /// Create an error with a suggestion and error code.
    pub fn with_details(
        message: impl Into<String>,
        suggestion: impl Into<String>,
        error_code: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            suggestion: Some(suggestion.into()),
            error_code: Some(error_code.into()),
            kind: None,
        }
    }

    /// The error rendered when an id does not match any task.
    pub fn not_found(id: &str) -> Self {
        let code = ErrorCode::TaskNotFound;
        Self {
            kind: Some("validation"),
            ..Self::with_details(
                format!("task '{id}' not found"),
                code.hint().unwrap_or_else(|| code.message()),
                code.code(),
            )
        }
    }
}

/// Convert a [`TodoError`] into a [`CliError`], keeping the kind visible.
impl From<&TodoError> for CliError {
    fn from(err: &TodoError) -> Self {
        let kind = match err {
            TodoError::Validation(_) => "validation",
            TodoError::Storage(_) => "storage",
            TodoError::Other { .. } => "other",
        };
        let message = match err {
            TodoError::Storage(_) => format!("could not save tasks: {err}"),
            _ => err.to_string(),
        };
        Self {
            message,
            suggestion: Some(err.suggestion()),
            error_code: Some(err.error_code().to_string()),
            kind: Some(kind),
        }
    }
}

/// Render a serializable value to stdout in the requested format.
///
/// In JSON mode, the value is serialized with `serde_json`. In pretty/text
/// mode, the provided `human_fn` closure is called to produce text output.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            human_fn(value, &mut out)?;
        }
    }
    Ok(())
}

/// Render with separate text and pretty formatters; JSON via `serde_json`.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text_fn(value, &mut out)?,
        OutputMode::Pretty => human_fn(value, &mut out)?,
    }
    Ok(())
}

/// A failure that has already been rendered to stderr.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Reported(pub String);

/// Render `error` to stderr and return the [`Reported`] marker to propagate.
pub fn fail_with(mode: OutputMode, error: &CliError) -> anyhow::Error {
    match render_error(mode, error) {
        Ok(()) => Reported(error.message.clone()).into(),
        Err(render_err) => render_err,
    }
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_error(&mut out, mode, error)
}

fn write_error(out: &mut dyn Write, mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut *out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            writeln!(out, "error: {}", error.message)?;
            if let Some(ref suggestion) = error.suggestion {
                writeln!(out, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}

/// Render a success message to stdout.
pub fn render_success(mode: OutputMode, message: &str) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "ok": true,
                "message": message,
            });
            serde_json::to_writer_pretty(&mut out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Pretty => writeln!(out, "✓ {message}")?,
        OutputMode::Text => writeln!(out, "{message}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use todos_core::error::{StorageError, ValidationError};

    fn sample(completed: bool) -> TaskRecord {
        let now = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let mut task = TaskRecord::new("td-abc123".into(), "Buy milk".into(), now);
        task.completed = completed;
        task
    }

    fn to_string(f: impl FnOnce(&mut dyn Write) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // ── resolve_output_mode_inner ───────────────────────────────────────────

    #[test]
    fn resolve_format_flag_wins_over_everything() {
        let mode = resolve_output_mode_inner(
            Some(OutputMode::Text),
            true,
            Some("pretty"),
            Some("json"),
            true,
        );
        assert_eq!(mode, OutputMode::Text);
    }

    #[test]
    fn resolve_json_flag_wins_over_env() {
        let mode = resolve_output_mode_inner(None, true, Some("pretty"), None, true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn resolve_env_wins_over_config() {
        let mode = resolve_output_mode_inner(None, false, Some("TEXT"), Some("json"), true);
        assert_eq!(mode, OutputMode::Text);
    }

    #[test]
    fn resolve_config_accepts_legacy_aliases() {
        let mode = resolve_output_mode_inner(None, false, None, Some("table"), true);
        assert_eq!(mode, OutputMode::Text);
        let mode = resolve_output_mode_inner(None, false, None, Some("human"), false);
        assert_eq!(mode, OutputMode::Pretty);
    }

    #[test]
    fn resolve_unknown_values_fall_through_to_tty() {
        let tty = resolve_output_mode_inner(None, false, Some("fancy"), Some("odd"), true);
        assert_eq!(tty, OutputMode::Pretty);
        let pipe = resolve_output_mode_inner(None, false, Some("fancy"), None, false);
        assert_eq!(pipe, OutputMode::Text);
    }

    // ── Task rendering ──────────────────────────────────────────────────────

    #[test]
    fn task_human_row_shows_checkbox() {
        let open = to_string(|w| sample(false).render_human(w));
        assert_eq!(open, "[ ] td-abc123  Buy milk\n");
        let done = to_string(|w| sample(true).render_human(w));
        assert!(done.starts_with("[x] "));
    }

    #[test]
    fn task_text_row_has_status_column() {
        let row = to_string(|w| sample(true).render_table(w));
        assert_eq!(row, "td-abc123  done  Buy milk\n");
        assert_eq!(TaskRecord::table_headers(), &["ID", "STATUS", "TEXT"]);
    }

    #[test]
    fn task_json_uses_store_layout() {
        let json = to_string(|w| write_item(w, &sample(false), OutputMode::Json));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], "td-abc123");
        assert_eq!(value["createdAt"], "2023-11-14T22:13:20Z");
    }

    #[test]
    fn text_rows_print_header_only_when_non_empty() {
        let empty = to_string(|w| write_rows::<TaskRecord>(w, &[], OutputMode::Text));
        assert!(empty.is_empty());

        let rows = to_string(|w| write_rows(w, &[sample(false), sample(true)], OutputMode::Text));
        let lines: Vec<&str> = rows.lines().collect();
        assert_eq!(lines[0], "ID  STATUS  TEXT");
        assert_eq!(lines.len(), 3);
    }

    // ── Errors ──────────────────────────────────────────────────────────────

    #[test]
    fn cli_error_from_validation_error() {
        let err = TodoError::from(ValidationError::EmptyText);
        let cli = CliError::from(&err);
        assert_eq!(cli.kind, Some("validation"));
        assert_eq!(cli.error_code.as_deref(), Some("E1001"));
        assert!(cli.suggestion.is_some());
    }

    #[test]
    fn cli_error_from_storage_error_mentions_saving() {
        let err = TodoError::from(StorageError::Write {
            key: "todos",
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        });
        let cli = CliError::from(&err);
        assert_eq!(cli.kind, Some("storage"));
        assert!(cli.message.starts_with("could not save tasks"));
        assert_eq!(cli.error_code.as_deref(), Some("E5001"));
    }

    #[test]
    fn not_found_error_carries_code() {
        let cli = CliError::not_found("td-zzz");
        assert!(cli.message.contains("td-zzz"));
        assert_eq!(cli.error_code.as_deref(), Some("E2001"));
    }

    #[test]
    fn json_error_is_wrapped() {
        let err = CliError::with_details("bad input", "try again", "E1001");
        let mut buf = Vec::new();
        write_error(&mut buf, OutputMode::Json, &err).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["error"]["message"], "bad input");
        assert_eq!(value["error"]["error_code"], "E1001");
    }

    #[test]
    fn human_error_includes_suggestion() {
        let err = CliError::with_details("bad input", "try again", "E1001");
        let mut buf = Vec::new();
        write_error(&mut buf, OutputMode::Pretty, &err).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "error: bad input\n  suggestion: try again\n");
    }

    #[test]
    fn render_json_output() {
        #[derive(Serialize)]
        struct TestData {
            count: u32,
        }
        let result = render(OutputMode::Json, &TestData { count: 42 }, |_, _| Ok(()));
        assert!(result.is_ok());
    }

    #[test]
    fn render_success_in_all_modes() {
        for mode in [OutputMode::Pretty, OutputMode::Text, OutputMode::Json] {
            assert!(render_success(mode, "it worked").is_ok());
        }
    }
}
