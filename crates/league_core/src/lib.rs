//! # league_core - Round-Robin League Simulation Engine
//!
//! Schedules a double round-robin season, plays it week by week with a
//! strength-weighted score model, keeps the points table, supports score
//! corrections and forecasts championship odds by Monte Carlo simulation.
//!
//! ## Features
//! - Storage behind repository traits ([`store::LeagueStore`])
//! - In-memory store with checksummed JSON snapshots
//! - Seedable RNG for reproducible seasons
//! - Parallel prediction trials (rayon)

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;

pub use config::{ConfigError, LeagueConfig};
pub use engine::{
    ChampionshipPredictor, LeagueService, MatchOutcome, MatchSimulator, SeasonOutcome,
    WeekOutcome,
};
pub use error::{ErrorKind, LeagueError, Result, StoreError};
pub use models::{
    Fixture, FixtureDraft, LeaguePhase, LeagueRecord, MatchId, MatchReport, Prediction, Score,
    Team, TeamId, TeamSeed,
};
pub use store::{
    load_snapshot, save_snapshot, LeagueRepository, LeagueStore, MatchRepository, MemoryStore,
    TeamRepository,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
