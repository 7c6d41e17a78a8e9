//! League CLI
//!
//! Drives the simulation engine against a snapshot file, one command per
//! invocation. Results are printed as JSON on stdout; logs go to stderr.

mod output;
mod seed;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use league_core::{
    load_snapshot, save_snapshot, LeagueConfig, LeagueError, LeagueService, MemoryStore,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use output::{print_json, Response};

#[derive(Parser)]
#[command(name = "league")]
#[command(about = "Simulate a double round-robin league", long_about = None)]
struct Cli {
    /// Snapshot file holding teams, fixtures and the league record
    #[arg(long, global = true, default_value = "league.json")]
    state: PathBuf,

    /// Engine config JSON (overrides LEAGUE_SIM_CONFIG_PATH)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a fresh snapshot with seeded teams
    Init {
        /// JSON array of {"name", "strength"} objects
        #[arg(long)]
        teams: Option<PathBuf>,

        /// League name
        #[arg(long, default_value = "Premier League")]
        name: String,

        /// Overwrite an existing snapshot
        #[arg(long)]
        force: bool,
    },

    #[command(flatten)]
    League(LeagueCommand),
}

/// Commands that run against an existing snapshot.
#[derive(Subcommand)]
enum LeagueCommand {
    /// Play the current week
    NextWeek,

    /// Play every remaining match
    PlayAll,

    /// Ranked league table
    Standings,

    /// Teams in store order
    Teams,

    /// League record (weeks, champion)
    Info,

    /// Results of the most recently played week
    WeekResults,

    /// All fixtures, or those of one week
    Matches {
        #[arg(long)]
        week: Option<u32>,
    },

    /// Correct the score of a match
    UpdateMatch { id: u32, home_score: u8, away_score: u8 },

    /// Delete fixtures and reset all stats
    Restart,

    /// Championship odds from week 4 on
    Predictions,
}

impl LeagueCommand {
    fn is_mutating(&self) -> bool {
        matches!(
            self,
            LeagueCommand::NextWeek
                | LeagueCommand::PlayAll
                | LeagueCommand::UpdateMatch { .. }
                | LeagueCommand::Restart
        )
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let kind = err.downcast_ref::<LeagueError>().map(LeagueError::kind);
            let response = Response::error(format!("{:#}", err), kind);
            match serde_json::to_string_pretty(&response) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let command = match cli.command {
        Commands::Init { teams, name, force } => {
            return init(&cli.state, teams.as_deref(), &name, force);
        }
        Commands::League(command) => command,
    };

    let config = match &cli.config {
        Some(path) => LeagueConfig::from_path(path)?,
        None => LeagueConfig::from_env()?,
    };

    let store = load_snapshot(&cli.state).with_context(|| {
        format!("Failed to load {} (run `league init` first)", cli.state.display())
    })?;
    let mut service = LeagueService::new(store, config)?;

    let result = execute(&mut service, &command);

    // Partial progress is kept even when the command failed midway.
    if !command.is_mutating() {
        return result;
    }
    let saved = save_snapshot(&cli.state, service.store())
        .with_context(|| format!("Failed to save {}", cli.state.display()));
    combine_results(result, saved)
}

/// The command's own failure wins over a failed save, so its error kind
/// still reaches the caller.
fn combine_results(result: Result<()>, saved: Result<()>) -> Result<()> {
    match (result, saved) {
        (Err(err), Err(save_err)) => {
            warn!("{:#}", save_err);
            Err(err)
        }
        (result, saved) => result.and(saved),
    }
}

fn init(state: &Path, teams: Option<&Path>, name: &str, force: bool) -> Result<()> {
    if state.exists() && !force {
        bail!("{} already exists; pass --force to overwrite", state.display());
    }

    let seeds = match teams {
        Some(path) => seed::load_seeds(path)?,
        None => seed::default_seeds(),
    };

    let store = MemoryStore::seeded(name, &seeds);
    save_snapshot(state, &store)
        .with_context(|| format!("Failed to write {}", state.display()))?;

    info!("Initialised '{}' with {} teams at {}", name, seeds.len(), state.display());
    print_json(&Response::success(&seeds).with_message(format!("League '{}' created", name)))
}

fn execute(service: &mut LeagueService<MemoryStore>, command: &LeagueCommand) -> Result<()> {
    match command {
        LeagueCommand::NextWeek => {
            let outcome = service.next_week()?;
            let message = match &outcome.champion {
                Some(champion) => {
                    format!("Week {} played; {} are champions", outcome.week, champion.name)
                }
                None => format!("Week {} played", outcome.week),
            };
            print_json(&Response::success(outcome).with_message(message))
        }
        LeagueCommand::PlayAll => {
            let outcome = service.play_all()?;
            let message = format!("Season complete; {} are champions", outcome.champion.name);
            print_json(&Response::success(outcome).with_message(message))
        }
        LeagueCommand::Standings => print_json(&Response::success(service.standings()?)),
        LeagueCommand::Teams => print_json(&Response::success(service.teams()?)),
        LeagueCommand::Info => print_json(&Response::success(service.league()?)),
        LeagueCommand::WeekResults => print_json(&Response::success(service.week_results()?)),
        LeagueCommand::Matches { week: Some(week) } => {
            print_json(&Response::success(service.matches_by_week(*week)?))
        }
        LeagueCommand::Matches { week: None } => {
            print_json(&Response::success(service.all_matches()?))
        }
        LeagueCommand::UpdateMatch { id, home_score, away_score } => {
            let fixture = service.update_match(*id, *home_score, *away_score)?;
            print_json(&Response::success(fixture).with_message(format!("Match {} updated", id)))
        }
        LeagueCommand::Restart => {
            service.restart_league()?;
            print_json(&Response::success(service.league()?).with_message("League restarted"))
        }
        LeagueCommand::Predictions => print_json(&Response::success(service.predictions()?)),
    }
}
