//! `td list` — list tasks through the active filter.

use crate::cmd::open_list;
use crate::output::{OutputMode, pretty_section, render_mode, write_rows};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use todos_core::{Filter, Stats, TaskRecord};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Ignore the active filter and show every task.
    #[arg(short, long)]
    pub all: bool,
}

/// JSON payload for `td list`.
#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub filter: Filter,
    pub tasks: Vec<TaskRecord>,
    pub stats: Stats,
}

pub fn run_list(args: &ListArgs, output: OutputMode, data_dir: &Path) -> anyhow::Result<()> {
    let list = open_list(data_dir);
    let (filter, tasks) = if args.all {
        (Filter::All, list.list())
    } else {
        (list.filter(), list.list_filtered())
    };

    let payload = ListOutput {
        filter,
        tasks,
        stats: list.stats(),
    };

    render_mode(
        output,
        &payload,
        |p, w| write_rows(w, &p.tasks, OutputMode::Text),
        |p, w| render_list_human(p, w),
    )
}

fn render_list_human(payload: &ListOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!(
            "Tasks ({}) · {} pending, {} completed",
            payload.filter, payload.stats.pending, payload.stats.completed
        ),
    )?;
    if payload.tasks.is_empty() {
        return writeln!(w, "No tasks to show.");
    }
    write_rows(w, &payload.tasks, OutputMode::Pretty)
}
