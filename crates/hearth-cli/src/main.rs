#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use hearth_core::error::StoreError;
use hearth_core::lock::LockError;
use hearth_core::{config, error::ErrorCode};
use output::{CliError, OutputMode};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "hearth: family chore tracker",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Database file (overrides HEARTH_DB and the config file).
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (alias for --format json).
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Setup",
        about = "Initialize the hearth database",
        after_help = "EXAMPLES:\n    # Create the database at the default location\n    hearth init\n\n    # Use an explicit database file\n    hearth init --db ./family.db"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        next_help_heading = "People",
        about = "Manage tracked people",
        subcommand,
        after_help = "EXAMPLES:\n    hearth person add --name Isaac --role kid\n    hearth person show 1\n    hearth person list --json"
    )]
    Person(cmd::person::PersonCommand),

    #[command(
        next_help_heading = "Tasks",
        about = "Manage global and personal chores",
        subcommand,
        after_help = "EXAMPLES:\n    # A chore for everyone\n    hearth task add --title \"Brush teeth\"\n\n    # A chore for one person\n    hearth task add --title \"Feed the cat\" --person 1"
    )]
    Task(cmd::task::TaskCommand),

    #[command(
        next_help_heading = "Daily",
        about = "Record a task completion for today",
        after_help = "EXAMPLES:\n    # Check off a global chore\n    hearth check 1 2\n\n    # Check off a personal chore\n    hearth check 1 3 --kind personal\n\n    # Un-check it again\n    hearth check 1 3 --kind personal --undo"
    )]
    Check(cmd::check::CheckArgs),

    #[command(
        next_help_heading = "Daily",
        about = "Show the month calendar grid",
        after_help = "EXAMPLES:\n    # This month for one person\n    hearth calendar 1\n\n    # A specific month for everyone\n    hearth calendar --all --year 2024 --month 2"
    )]
    Calendar(cmd::calendar::CalendarArgs),

    #[command(
        next_help_heading = "Maintenance",
        about = "Recompute one day's summary from the ledger",
        after_help = "EXAMPLES:\n    # Heal today's summary for person 1\n    hearth rebuild-day 1\n\n    # Heal a specific day\n    hearth rebuild-day 1 --day 2024-02-14"
    )]
    RebuildDay(cmd::rebuild::RebuildDayArgs),

    #[command(
        next_help_heading = "Maintenance",
        about = "Check database health and report store stats"
    )]
    Doctor(cmd::doctor::DoctorArgs),

    #[command(
        next_help_heading = "Maintenance",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    hearth completions bash\n    hearth completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("HEARTH_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn dispatch(cli: &Cli, ctx: &cmd::Ctx) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Init(args) => cmd::init::run(args, ctx),
        Commands::Person(command) => cmd::person::run(command, ctx),
        Commands::Task(command) => cmd::task::run(command, ctx),
        Commands::Check(args) => cmd::check::run(args, ctx),
        Commands::Calendar(args) => cmd::calendar::run(args, ctx),
        Commands::RebuildDay(args) => cmd::rebuild::run(args, ctx),
        Commands::Doctor(args) => cmd::doctor::run(args, ctx),
        Commands::Completions(args) => cmd::completions::run(args, &mut Cli::command()),
    }
}

fn to_cli_error(error: &anyhow::Error) -> CliError {
    if let Some(store_error) = error.downcast_ref::<StoreError>() {
        let rendered = CliError::new(store_error.code().code(), store_error.to_string());
        return match store_error.hint() {
            Some(hint) => rendered.with_hint(hint),
            None => rendered,
        };
    }
    if let Some(lock_error) = error.downcast_ref::<LockError>() {
        let rendered = CliError::new(lock_error.code().code(), lock_error.to_string());
        return match lock_error.hint() {
            Some(hint) => rendered.with_hint(hint),
            None => rendered,
        };
    }
    CliError::new(ErrorCode::InternalUnexpected.code(), format!("{error:#}"))
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mode = output::resolve_output_mode(cli.format, cli.json);

    let config = match config::load_config() {
        Ok(config) => config,
        Err(error) => {
            let rendered = CliError::new(ErrorCode::ConfigParseError.code(), format!("{error:#}"));
            let _ = output::render_error(mode, &rendered);
            std::process::exit(1);
        }
    };

    let ctx = cmd::Ctx {
        db_path: config::resolve_db_path(cli.db.as_deref(), &config),
        output: mode,
        quiet: cli.quiet,
    };
    tracing::debug!(db = %ctx.db_path.display(), "resolved store path");

    if let Err(error) = dispatch(&cli, &ctx) {
        let _ = output::render_error(mode, &to_cli_error(&error));
        std::process::exit(1);
    }
}
