//! `td stats` — totals across the whole list.

use std::io::Write;
use std::path::Path;

use clap::Args;
use todos_core::Stats;

use crate::cmd::open_list;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `td stats`.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {}

/// Execute `td stats`.
pub fn run_stats(_args: &StatsArgs, output: OutputMode, data_dir: &Path) -> anyhow::Result<()> {
    let stats = open_list(data_dir).stats();
    render_mode(output, &stats, render_stats_text, render_stats_human)
}

fn render_stats_text(stats: &Stats, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "total      {}", stats.total)?;
    writeln!(w, "completed  {}", stats.completed)?;
    writeln!(w, "pending    {}", stats.pending)
}

fn render_stats_human(stats: &Stats, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Task stats")?;
    pretty_kv(w, "total", stats.total.to_string())?;
    pretty_kv(w, "completed", stats.completed.to_string())?;
    pretty_kv(w, "pending", stats.pending.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn text_stats_lists_each_count() {
        let stats = Stats {
            total: 2,
            completed: 1,
            pending: 1,
        };
        let mut buf = Vec::new();
        render_stats_text(&stats, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "total      2\ncompleted  1\npending    1\n"
        );
    }

    #[test]
    fn run_stats_on_empty_dir() {
        let tmp = TempDir::new().expect("tempdir");
        assert!(run_stats(&StatsArgs::default(), OutputMode::Json, tmp.path()).is_ok());
    }
}
