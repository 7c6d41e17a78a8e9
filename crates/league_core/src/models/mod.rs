//! League data model: teams, fixtures and the singleton league record.

pub mod fixture;
pub mod league;
pub mod team;

pub use fixture::{Fixture, FixtureDraft, MatchId, MatchReport, Score};
pub use league::{LeaguePhase, LeagueRecord, Prediction};
pub use team::{Team, TeamId, TeamSeed};
