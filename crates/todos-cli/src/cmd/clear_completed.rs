//! `td clear-completed` — delete every completed task.

use crate::cmd::{fail, open_list_for_update};
use crate::output::{OutputMode, render};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct ClearCompletedOutput {
    removed: usize,
    remaining: usize,
}

pub fn run_clear_completed(output: OutputMode, data_dir: &Path) -> anyhow::Result<()> {
    let mut list = open_list_for_update(data_dir, output)?;
    let removed = match list.remove_completed() {
        Ok(removed) => removed,
        Err(err) => return fail(output, &err),
    };

    let payload = ClearCompletedOutput {
        removed,
        remaining: list.count(),
    };
    render(output, &payload, |p, w| match output {
        OutputMode::Pretty => writeln!(
            w,
            "✓ Removed {} completed task(s), {} remaining",
            p.removed, p.remaining
        ),
        _ => writeln!(w, "{}", p.removed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::open_list;
    use tempfile::TempDir;

    #[test]
    fn run_clear_completed_keeps_pending() {
        let tmp = TempDir::new().expect("tempdir");
        let mut list = open_list(tmp.path());
        let milk = list.add("Buy milk").unwrap();
        let dog = list.add("Walk dog").unwrap();
        list.toggle(&milk.id).unwrap();

        run_clear_completed(OutputMode::Json, tmp.path()).unwrap();

        let remaining = open_list(tmp.path()).list();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, dog.id);
    }
}
