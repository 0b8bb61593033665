//! `td show` — display a single task.
//!
//! Supports partial ID resolution: "a7x" → "td-a7x", and prefix matching
//! when an exact match is not found.

use crate::cmd::{fail, open_list, resolve_or_fail};
use crate::output::{
    CliError, OutputMode, fail_with, local_time, pretty_kv, pretty_section, render_mode,
    status_word,
};
use clap::Args;
use std::io::Write;
use std::path::Path;
use todos_core::TaskRecord;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Task ID to display. Supports partial IDs: "a7x" → "td-a7x".
    pub id: String,
}

/// Execute `td show <id>`.
///
/// # Errors
///
/// Returns an error if the id is unknown or output rendering fails.
pub fn run_show(args: &ShowArgs, output: OutputMode, data_dir: &Path) -> anyhow::Result<()> {
    let list = open_list(data_dir);
    let id = resolve_or_fail(&list, &args.id, output)?;

    let task = match list.get(&id) {
        Ok(Some(task)) => task,
        Ok(None) => return Err(fail_with(output, &CliError::not_found(&id))),
        Err(err) => return fail(output, &err),
    };

    render_mode(output, &task, render_show_text, render_show_human)
}

fn render_show_text(task: &TaskRecord, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "id          {}", task.id)?;
    writeln!(w, "text        {}", task.text)?;
    writeln!(w, "status      {}", status_word(task.completed))?;
    writeln!(w, "created_at  {}", task.created_at.to_rfc3339())?;
    writeln!(w, "updated_at  {}", task.updated_at.to_rfc3339())
}

fn render_show_human(task: &TaskRecord, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Task {}", task.id))?;
    writeln!(w, "{}", task.text)?;
    writeln!(w)?;
    pretty_kv(w, "status", status_word(task.completed))?;
    pretty_kv(w, "created", local_time(task.created_at))?;
    pretty_kv(w, "updated", local_time(task.updated_at))
}
