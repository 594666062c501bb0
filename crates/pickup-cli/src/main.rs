// `pickup` entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr; stdout carries the JSON result)
// 2. Parse arguments
// 3. Load config (balance only)
// 4. Run the command and print the report
// 5. Map failures to exit codes

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use pickup_cli::commands::{self, CommandError, FudgeMode, Report, EXIT_FAILURE};
use pickup_cli::config;

#[derive(Parser)]
#[command(name = "pickup", about = "Split the weekly roster into balanced teams")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate teams from a roster file (JSON or CSV)
    Balance {
        /// Roster file: a player array, a `{ players, numTeams }` body, or a CSV export
        #[arg(long)]
        roster: PathBuf,
        /// Number of teams; overrides the request and the configured default
        #[arg(long, allow_negative_numbers = true)]
        teams: Option<i64>,
        /// Seed the fudge for a reproducible split
        #[arg(long)]
        seed: Option<u64>,
        /// Score players without the random fudge
        #[arg(long)]
        no_fudge: bool,
    },
    /// Move a player between teams of a saved allocation and recompute both
    Move {
        /// Allocation JSON previously written by `pickup balance`
        #[arg(long)]
        teams: PathBuf,
        #[arg(long)]
        player: String,
        #[arg(long)]
        from: usize,
        #[arg(long)]
        to: usize,
    },
}

const DEFAULT_LOG_FILTER: &str = "pickup=info,pickup_cli=info,pickup_core=info,warn";

fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("failed to initialize logging: {e:#}");
        return ExitCode::from(EXIT_FAILURE);
    }

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {e:#}");
            let code = e
                .downcast_ref::<CommandError>()
                .map_or(EXIT_FAILURE, CommandError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let report = match cli.command {
        Command::Balance {
            roster,
            teams,
            seed,
            no_fudge,
        } => {
            let config = config::load_config().context("failed to load configuration")?;
            info!(
                "Config loaded: fudge range {}, default {} teams",
                config.engine.fudge_range, config.default_teams
            );
            let mode = FudgeMode::from_flags(seed, no_fudge);
            commands::balance_command(&roster, teams, mode, &config)?
        }
        Command::Move {
            teams,
            player,
            from,
            to,
        } => commands::move_command(&teams, &player, from, to)?,
    };
    print_report(&report)
}

fn print_report(report: &Report) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    println!("{text}");
    Ok(())
}

/// Initialize tracing to stderr.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
