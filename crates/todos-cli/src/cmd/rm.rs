//! `td rm` — delete a task.

use crate::cmd::{fail, open_list_for_update, resolve_or_fail};
use crate::output::{CliError, OutputMode, fail_with, render};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Task ID to delete. Supports partial IDs.
    pub id: String,
}

#[derive(Debug, Serialize)]
struct RmOutput {
    ok: bool,
    removed: String,
}

pub fn run_rm(args: &RmArgs, output: OutputMode, data_dir: &Path) -> anyhow::Result<()> {
    let mut list = open_list_for_update(data_dir, output)?;
    let id = resolve_or_fail(&list, &args.id, output)?;

    match list.remove(&id) {
        Ok(true) => {}
        Ok(false) => return Err(fail_with(output, &CliError::not_found(&id))),
        Err(err) => return fail(output, &err),
    }

    let payload = RmOutput {
        ok: true,
        removed: id,
    };
    render(output, &payload, |p, w| match output {
        OutputMode::Pretty => writeln!(w, "✓ Removed {}", p.removed),
        _ => writeln!(w, "{}", p.removed),
    })
}
