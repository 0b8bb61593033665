//! `td toggle` — flip a task between pending and completed.

use crate::cmd::{fail, open_list_for_update, resolve_or_fail};
use crate::output::{CliError, OutputMode, fail_with, render_item};
use clap::Args;
use std::path::Path;

#[derive(Args, Debug)]
pub struct ToggleArgs {
    /// Task ID to toggle. Supports partial IDs.
    pub id: String,
}

pub fn run_toggle(args: &ToggleArgs, output: OutputMode, data_dir: &Path) -> anyhow::Result<()> {
    let mut list = open_list_for_update(data_dir, output)?;
    let id = resolve_or_fail(&list, &args.id, output)?;

    let task = match list.toggle(&id) {
        Ok(Some(task)) => task,
        Ok(None) => return Err(fail_with(output, &CliError::not_found(&id))),
        Err(err) => return fail(output, &err),
    };

    render_item(&task, output)?;
    Ok(())
}
