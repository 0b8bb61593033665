//! `td export` — write every task as a pretty JSON array.

use crate::cmd::{fail, open_list};
use crate::output::{OutputMode, render_success};
use anyhow::Context as _;
use clap::Args;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output JSON path (defaults to stdout).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// The exported document is the payload itself, so stdout carries it
/// unchanged in every output mode.
pub fn run_export(args: &ExportArgs, output: OutputMode, data_dir: &Path) -> anyhow::Result<()> {
    let list = open_list(data_dir);
    let exported = match list.export_all() {
        Ok(text) => text,
        Err(err) => return fail(output, &err),
    };

    match args.output.as_ref() {
        Some(path) => {
            fs::write(path, format!("{exported}\n"))
                .with_context(|| format!("failed to write export file {}", path.display()))?;
            render_success(
                output,
                &format!("Exported {} task(s) to {}", list.count(), path.display()),
            )
        }
        None => {
            let mut out = io::stdout().lock();
            writeln!(out, "{exported}")?;
            Ok(())
        }
    }
}
