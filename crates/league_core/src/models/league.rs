use serde::{Deserialize, Serialize};

use super::team::TeamId;

/// The singleton league row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueRecord {
    pub id: u32,
    pub name: String,
    /// 0 until the season starts.
    pub current_week: u32,
    pub total_weeks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub champion: Option<String>,
}

impl LeagueRecord {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), current_week: 0, total_weeks: 0, champion: None }
    }

    /// Week counters and champion back to the pre-season state.
    pub fn reset(&mut self) {
        self.current_week = 0;
        self.total_weeks = 0;
        self.champion = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaguePhase {
    /// No fixtures exist.
    NotStarted,
    /// Fixtures exist and some are unplayed.
    InProgress,
    /// Every fixture has been played.
    Completed,
}

/// Championship odds for one team, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub team_id: TeamId,
    pub team_name: String,
    pub championship_odds: f64,
}
