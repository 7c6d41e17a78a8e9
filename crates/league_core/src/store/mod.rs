//! Persistence boundary.
//!
//! The engine reaches storage only through these repository traits, so any
//! backend (a database, the bundled [`MemoryStore`], a failing fake in tests)
//! can be injected into [`crate::engine::LeagueService`].

pub mod memory;
pub mod snapshot;

use crate::error::StoreError;
use crate::models::{Fixture, FixtureDraft, LeagueRecord, MatchId, Score, Team, TeamId};

pub use memory::MemoryStore;
pub use snapshot::{load_snapshot, save_snapshot, StoreSnapshot, SNAPSHOT_VERSION};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

pub trait TeamRepository {
    fn teams(&self) -> StoreResult<Vec<Team>>;

    fn team(&self, id: TeamId) -> StoreResult<Option<Team>>;

    fn team_by_name(&self, name: &str) -> StoreResult<Option<Team>>;

    fn update_team(&mut self, team: &Team) -> StoreResult<()>;

    /// Zero the cumulative stats of every team.
    fn reset_teams(&mut self) -> StoreResult<()>;
}

pub trait MatchRepository {
    fn fixtures(&self) -> StoreResult<Vec<Fixture>>;

    fn fixtures_by_week(&self, week: u32) -> StoreResult<Vec<Fixture>>;

    fn unplayed_for_week(&self, week: u32) -> StoreResult<Vec<Fixture>>;

    fn fixture(&self, id: MatchId) -> StoreResult<Option<Fixture>>;

    /// Bulk insert; the store assigns ids.
    fn insert_fixtures(&mut self, drafts: Vec<FixtureDraft>) -> StoreResult<Vec<Fixture>>;

    /// Record scores and mark the fixture played.
    fn save_result(&mut self, id: MatchId, home_score: Score, away_score: Score)
        -> StoreResult<()>;

    fn clear_fixtures(&mut self) -> StoreResult<()>;
}

pub trait LeagueRepository {
    fn league(&self) -> StoreResult<LeagueRecord>;

    fn update_league(&mut self, league: &LeagueRecord) -> StoreResult<()>;

    fn increment_week(&mut self) -> StoreResult<()>;
}

/// Everything the orchestrator needs from a backend.
pub trait LeagueStore: TeamRepository + MatchRepository + LeagueRepository {}

impl<T> LeagueStore for T where T: TeamRepository + MatchRepository + LeagueRepository {}
