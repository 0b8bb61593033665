//! `td add` — create a new task.

use crate::cmd::{fail, open_list_for_update};
use crate::output::{OutputMode, pretty_kv, render};
use clap::Args;
use std::io::Write;
use std::path::Path;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Task text. Multiple words are joined with single spaces.
    #[arg(required = true, num_args = 1.., value_name = "TEXT")]
    pub text: Vec<String>,
}

pub fn run_add(args: &AddArgs, output: OutputMode, data_dir: &Path) -> anyhow::Result<()> {
    let mut list = open_list_for_update(data_dir, output)?;
    let text = args.text.join(" ");

    let task = match list.add(&text) {
        Ok(task) => task,
        Err(err) => return fail(output, &err),
    };

    render(output, &task, |task, w| match output {
        OutputMode::Pretty => {
            writeln!(w, "✓ Added {}", task.id)?;
            pretty_kv(w, "Text", &task.text)
        }
        _ => writeln!(w, "{}", task.id),
    })
}
