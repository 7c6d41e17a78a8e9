use serde::{Deserialize, Serialize};

pub type TeamId = u32;

/// A competitor and its cumulative league statistics.
///
/// `strength` is assigned when the team is seeded and never modified by the
/// engine. Every other counter is owned by the standings code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub strength: u32,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub matches: i32,
    #[serde(default)]
    pub wins: i32,
    #[serde(default)]
    pub draws: i32,
    #[serde(default)]
    pub losses: i32,
    #[serde(default)]
    pub goals_for: i32,
    #[serde(default)]
    pub goals_against: i32,
    #[serde(default)]
    pub goals_difference: i32,
    /// Reserved; carried and reset but never interpreted.
    #[serde(default)]
    pub temporary_drop: i32,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>, strength: u32) -> Self {
        Self {
            id,
            name: name.into(),
            strength,
            points: 0,
            matches: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            goals_difference: 0,
            temporary_drop: 0,
        }
    }

    /// Re-derive goal difference from goals for/against.
    pub fn refresh_goal_difference(&mut self) {
        self.goals_difference = self.goals_for - self.goals_against;
    }

    /// Zero every cumulative stat, keeping identity and strength.
    pub fn reset_stats(&mut self) {
        *self = Team::new(self.id, std::mem::take(&mut self.name), self.strength);
    }

    /// Ranking key: points, then goal difference, then goals scored.
    pub fn ranking_key(&self) -> (i32, i32, i32) {
        (self.points, self.goals_difference, self.goals_for)
    }
}

/// Seed data used to populate a fresh store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSeed {
    pub name: String,
    pub strength: u32,
}

impl TeamSeed {
    pub fn new(name: impl Into<String>, strength: u32) -> Self {
        Self { name: name.into(), strength }
    }
}
