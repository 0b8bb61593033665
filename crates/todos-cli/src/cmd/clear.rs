//! `td clear` — remove every task.

use crate::cmd::{fail, open_list_for_update};
use crate::output::{OutputMode, render_success};
use clap::Args;
use std::path::Path;

#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Also forget the saved filter and delete the stored files.
    #[arg(long)]
    pub reset: bool,
}

pub fn run_clear(args: &ClearArgs, output: OutputMode, data_dir: &Path) -> anyhow::Result<()> {
    let mut list = open_list_for_update(data_dir, output)?;
    let removed = list.count();

    let result = if args.reset { list.reset() } else { list.clear() };
    if let Err(err) = result {
        return fail(output, &err);
    }

    let message = if args.reset {
        format!("Reset task list ({removed} task(s) removed)")
    } else {
        format!("Cleared {removed} task(s)")
    };
    render_success(output, &message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::open_list;
    use clap::Parser;
    use tempfile::TempDir;
    use todos_core::Filter;

    #[test]
    fn clear_args_defaults() {
        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: ClearArgs,
        }
        assert!(!Wrapper::parse_from(["test"]).args.reset);
        assert!(Wrapper::parse_from(["test", "--reset"]).args.reset);
    }

    #[test]
    fn run_clear_keeps_filter() {
        let tmp = TempDir::new().expect("tempdir");
        let mut list = open_list(tmp.path());
        list.add("Buy milk").unwrap();
        list.set_filter(Filter::Pending).unwrap();

        run_clear(&ClearArgs { reset: false }, OutputMode::Json, tmp.path()).unwrap();

        let reopened = open_list(tmp.path());
        assert!(reopened.is_empty());
        assert_eq!(reopened.filter(), Filter::Pending);
    }

    #[test]
    fn run_clear_reset_forgets_filter() {
        let tmp = TempDir::new().expect("tempdir");
        let mut list = open_list(tmp.path());
        list.add("Buy milk").unwrap();
        list.set_filter(Filter::Pending).unwrap();

        run_clear(&ClearArgs { reset: true }, OutputMode::Json, tmp.path()).unwrap();

        let reopened = open_list(tmp.path());
        assert!(reopened.is_empty());
        assert_eq!(reopened.filter(), Filter::All);
    }
}
