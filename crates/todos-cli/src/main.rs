#![forbid(unsafe_code)]

mod cmd;
mod output;
mod validate;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, Reported, fail_with, render_error};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use todos_core::config::{self, EffectiveConfig};
use todos_core::error::ErrorCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "td",
    author,
    version,
    about = "td: a small persistent todo list",
    long_about = None
)]
struct Cli {
    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format. Overrides --json and FORMAT.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Data directory holding the task list (overrides TODOS_DIR and config).
    #[arg(long, global = true, value_name = "PATH")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Tasks",
        about = "Add a task",
        long_about = "Add a task. Whitespace is collapsed; text must be 1-200 characters.",
        after_help = "EXAMPLES:\n    # Add a task\n    td add Buy milk\n\n    # Emit machine-readable output\n    td add \"Walk dog\" --json"
    )]
    Add(cmd::add::AddArgs),

    #[command(
        next_help_heading = "Read",
        about = "List tasks",
        long_about = "List tasks through the saved filter, or every task with --all.",
        after_help = "EXAMPLES:\n    # List tasks matching the saved filter\n    td list\n\n    # Ignore the filter\n    td list --all"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one task",
        after_help = "EXAMPLES:\n    # Show a task\n    td show td-a7x2k9\n\n    # Use a short prefix when unique\n    td show a7x"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Tasks",
        about = "Edit a task's text or completion flag",
        after_help = "EXAMPLES:\n    # Rename a task\n    td edit a7x --text \"Buy oat milk\"\n\n    # Mark it done\n    td edit a7x --completed yes"
    )]
    Edit(cmd::edit::EditArgs),

    #[command(
        next_help_heading = "Tasks",
        about = "Flip a task between pending and completed"
    )]
    Toggle(cmd::toggle::ToggleArgs),

    #[command(next_help_heading = "Tasks", about = "Delete a task")]
    Rm(cmd::rm::RmArgs),

    #[command(next_help_heading = "Tasks", about = "Delete every completed task")]
    ClearCompleted,

    #[command(
        next_help_heading = "Read",
        about = "Show or set the saved view filter",
        after_help = "EXAMPLES:\n    # Print the current filter\n    td filter\n\n    # Only show pending tasks from now on\n    td filter pending"
    )]
    Filter(cmd::filter::FilterArgs),

    #[command(next_help_heading = "Read", about = "Show total, completed and pending counts")]
    Stats(cmd::stats::StatsArgs),

    #[command(next_help_heading = "Read", about = "Print the number of tasks")]
    Count,

    #[command(
        next_help_heading = "Maintenance",
        about = "Remove every task",
        long_about = "Remove every task. The saved filter is kept unless --reset is given."
    )]
    Clear(cmd::clear::ClearArgs),

    #[command(
        next_help_heading = "Interoperability",
        about = "Export tasks as JSON",
        after_help = "EXAMPLES:\n    # Print to stdout\n    td export\n\n    # Write a backup file\n    td export --output backup.json"
    )]
    Export(cmd::export::ExportArgs),

    #[command(
        next_help_heading = "Interoperability",
        about = "Replace tasks with an exported JSON array",
        after_help = "EXAMPLES:\n    # Restore a backup\n    td import backup.json\n\n    # Read from stdin\n    cat backup.json | td import -"
    )]
    Import(cmd::import::ImportArgs),

    #[command(
        next_help_heading = "Maintenance",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    td completions bash\n\n    # Generate zsh completions\n    td completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("TODOS_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "todos_core=debug,todos_cli=debug,info"
        } else {
            "todos_core=warn,todos_cli=warn,warn"
        })
    });

    let format = env::var("TODOS_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<EffectiveConfig> {
    config::resolve_config(cli.dir.as_deref()).map_err(|err| {
        let output = output::resolve_output_mode(cli.format, cli.json, None);
        let code = ErrorCode::ConfigParseError;
        fail_with(
            output,
            &CliError::with_details(
                format!("{err:#}"),
                code.hint().unwrap_or_else(|| code.message()),
                code.code(),
            ),
        )
    })
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    let output = output::resolve_output_mode(cli.format, cli.json, config.user.output.as_deref());
    let data_dir = config.data_dir.as_path();
    debug!(data_dir = %data_dir.display(), ?output, "resolved invocation");

    match &cli.command {
        Commands::Add(args) => cmd::add::run_add(args, output, data_dir),
        Commands::List(args) => cmd::list::run_list(args, output, data_dir),
        Commands::Show(args) => cmd::show::run_show(args, output, data_dir),
        Commands::Edit(args) => cmd::edit::run_edit(args, output, data_dir),
        Commands::Toggle(args) => cmd::toggle::run_toggle(args, output, data_dir),
        Commands::Rm(args) => cmd::rm::run_rm(args, output, data_dir),
        Commands::ClearCompleted => cmd::clear_completed::run_clear_completed(output, data_dir),
        Commands::Filter(args) => cmd::filter::run_filter(args, output, data_dir),
        Commands::Stats(args) => cmd::stats::run_stats(args, output, data_dir),
        Commands::Count => cmd::count::run_count(output, data_dir),
        Commands::Clear(args) => cmd::clear::run_clear(args, output, data_dir),
        Commands::Export(args) => cmd::export::run_export(args, output, data_dir),
        Commands::Import(args) => cmd::import::run_import(args, output, data_dir),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.downcast_ref::<Reported>().is_none() {
                let output = output::resolve_output_mode(cli.format, cli.json, None);
                let code = ErrorCode::InternalUnexpected;
                let _ = render_error(
                    output,
                    &CliError::with_details(
                        format!("{err:#}"),
                        code.hint().unwrap_or_else(|| code.message()),
                        code.code(),
                    ),
                );
            }
            debug!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}
