//! `td count` — number of tasks, ignoring the filter.

use crate::cmd::open_list;
use crate::output::{OutputMode, render};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct CountOutput {
    count: usize,
    empty: bool,
}

pub fn run_count(output: OutputMode, data_dir: &Path) -> anyhow::Result<()> {
    let list = open_list(data_dir);
    let payload = CountOutput {
        count: list.count(),
        empty: list.is_empty(),
    };
    render(output, &payload, |p, w| match output {
        OutputMode::Pretty if p.empty => writeln!(w, "No tasks yet."),
        OutputMode::Pretty => writeln!(w, "{} task(s)", p.count),
        _ => writeln!(w, "{}", p.count),
    })
}
