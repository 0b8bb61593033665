//! `td edit` — change a task's text and/or completion flag.

use crate::cmd::{fail, open_list_for_update, resolve_or_fail};
use crate::output::{CliError, OutputMode, fail_with, pretty_kv, render, status_word};
use clap::Args;
use std::io::Write;
use std::path::Path;
use todos_core::TaskPatch;
use todos_core::TodoError;
use todos_core::validate::parse_completed;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Task ID to edit. Supports partial IDs.
    pub id: String,

    /// Replacement text.
    #[arg(short, long)]
    pub text: Option<String>,

    /// Completion flag: true/false, yes/no, done/pending.
    #[arg(short, long, value_name = "BOOL")]
    pub completed: Option<String>,
}

pub fn run_edit(args: &EditArgs, output: OutputMode, data_dir: &Path) -> anyhow::Result<()> {
    let completed = match args.completed.as_deref().map(parse_completed).transpose() {
        Ok(flag) => flag,
        Err(err) => return fail(output, &TodoError::from(err)),
    };

    let mut list = open_list_for_update(data_dir, output)?;
    let id = resolve_or_fail(&list, &args.id, output)?;
    let patch = TaskPatch {
        text: args.text.clone(),
        completed,
    };

    let task = match list.update(&id, patch) {
        Ok(Some(task)) => task,
        Ok(None) => return Err(fail_with(output, &CliError::not_found(&id))),
        Err(err) => return fail(output, &err),
    };

    render(output, &task, |task, w| match output {
        OutputMode::Pretty => {
            writeln!(w, "✓ Updated {}", task.id)?;
            pretty_kv(w, "Text", &task.text)?;
            pretty_kv(w, "Status", status_word(task.completed))
        }
        _ => writeln!(w, "{}", task.id),
    })
}
