//! Rollcall CLI - attendance calendar driver
//!
//! A command-line host for the calendar selection engine: compute labels,
//! expansions and month grids, or replay a gesture script through one engine
//! instance and inspect every intermediate state.

mod commands;
mod output;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use rollcall_core::{CalendarConfig, Clock, SystemClock};

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(author, version, about = "Attendance calendar selection CLI", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: table (default) or json
    #[arg(long, global = true, default_value = "table")]
    format: output::OutputFormat,

    /// Suppress progress messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Calendar config file (or set ROLLCALL_CONFIG env var)
    #[arg(long, env = "ROLLCALL_CONFIG", global = true)]
    config: Option<String>,

    /// Pin "today" (YYYY-MM-DD) instead of reading the system clock
    #[arg(long, global = true)]
    today: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Labels, expansions, pattern detection and month grids
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },

    /// Replay a gesture script through one selection engine
    Replay(commands::replay::ReplayArgs),

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Map -v flags to a log level; RUST_LOG wins when set
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let today = match &cli.today {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("Invalid --today: {}. Use YYYY-MM-DD", raw))?,
        None => SystemClock.today(),
    };

    let config = CalendarConfig::load(cli.config.as_deref())?;
    log::debug!("Using calendar config: {:?}", config);

    let ctx = commands::Context {
        config,
        config_arg: cli.config,
        format: cli.format,
        quiet: cli.quiet,
        today,
    };

    match cli.command {
        Commands::Calendar { action } => commands::calendar::execute(&ctx, action),
        Commands::Replay(args) => commands::replay::execute(&ctx, args),
        Commands::Config { action } => commands::config::execute(&ctx, action),
    }
}
