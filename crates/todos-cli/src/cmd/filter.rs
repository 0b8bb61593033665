//! `td filter` — show or set the active view filter.

use crate::cmd::{fail, open_list, open_list_for_update};
use crate::output::{OutputMode, render};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use todos_core::Filter;

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// New filter: all, completed, or pending. Omit to print the current one.
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
struct FilterOutput {
    filter: Filter,
    changed: bool,
}

pub fn run_filter(args: &FilterArgs, output: OutputMode, data_dir: &Path) -> anyhow::Result<()> {
    let payload = match args.value.as_deref() {
        None => FilterOutput {
            filter: open_list(data_dir).filter(),
            changed: false,
        },
        Some(raw) => match open_list_for_update(data_dir, output)?.set_filter_str(raw) {
            Ok(filter) => FilterOutput {
                filter,
                changed: true,
            },
            Err(err) => return fail(output, &err),
        },
    };

    render(output, &payload, |p, w| match output {
        OutputMode::Pretty if p.changed => writeln!(w, "✓ Filter set to {}", p.filter),
        OutputMode::Pretty => writeln!(w, "Filter: {}", p.filter),
        _ => writeln!(w, "{}", p.filter),
    })
}
