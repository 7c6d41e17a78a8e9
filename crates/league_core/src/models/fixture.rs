use serde::{Deserialize, Serialize};

use super::team::TeamId;

pub type MatchId = u32;
pub type Score = u8;

/// A scheduled match. Home and away are fixture-order labels only; the
/// simulator treats both sides the same.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: MatchId,
    pub week: u32,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    #[serde(default)]
    pub home_score: Score,
    #[serde(default)]
    pub away_score: Score,
    #[serde(default)]
    pub played: bool,
}

/// A fixture produced by the generator before the store assigns it an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureDraft {
    pub week: u32,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
}

impl FixtureDraft {
    pub fn into_fixture(self, id: MatchId) -> Fixture {
        Fixture {
            id,
            week: self.week,
            home_team_id: self.home_team_id,
            away_team_id: self.away_team_id,
            home_score: 0,
            away_score: 0,
            played: false,
        }
    }
}

/// Read-side view of a fixture with team names resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub id: MatchId,
    pub week: u32,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Score,
    pub away_score: Score,
    pub played: bool,
}

impl MatchReport {
    pub fn new(fixture: &Fixture, home_team: &str, away_team: &str) -> Self {
        Self {
            id: fixture.id,
            week: fixture.week,
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            home_score: fixture.home_score,
            away_score: fixture.away_score,
            played: fixture.played,
        }
    }
}
