//! `td import` — replace the list with tasks from an exported JSON array.

use crate::cmd::{fail, open_list_for_update};
use crate::output::{OutputMode, render};
use anyhow::Context as _;
use clap::Args;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON file to import, or `-` for stdin.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read import data from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(input)
        .with_context(|| format!("failed to read import file {}", input.display()))
}

pub fn run_import(args: &ImportArgs, output: OutputMode, data_dir: &Path) -> anyhow::Result<()> {
    let text = read_input(&args.input)?;
    let mut list = open_list_for_update(data_dir, output)?;

    let report = match list.import_with_report(&text) {
        Ok(report) => report,
        Err(err) => return fail(output, &err),
    };

    render(output, &report, |r, w| match output {
        OutputMode::Pretty => {
            writeln!(w, "✓ Imported {} task(s)", r.imported)?;
            if r.skipped > 0 {
                writeln!(w, "  skipped {} unusable entries", r.skipped)?;
            }
            Ok(())
        }
        _ => writeln!(w, "{}  {}", r.imported, r.skipped),
    })
}
