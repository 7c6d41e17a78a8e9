//! Strength-weighted score generator.
//!
//! Deliberately lightweight: each side's score is an independent draw, so
//! draws, routs and mirrored results are all reachable.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_SCORE_CAP;
use crate::models::Score;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    HomeWin,
    Draw,
    AwayWin,
}

impl MatchOutcome {
    pub fn from_scores(home_score: Score, away_score: Score) -> Self {
        match home_score.cmp(&away_score) {
            std::cmp::Ordering::Greater => MatchOutcome::HomeWin,
            std::cmp::Ordering::Less => MatchOutcome::AwayWin,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSimulator {
    score_cap: Score,
}

impl Default for MatchSimulator {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_CAP)
    }
}

impl MatchSimulator {
    pub fn new(score_cap: Score) -> Self {
        Self { score_cap }
    }

    /// Simulate one match, returning `(home_score, away_score)`.
    pub fn play<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        home_strength: u32,
        away_strength: u32,
    ) -> (Score, Score) {
        (self.side_score(rng, home_strength), self.side_score(rng, away_strength))
    }

    /// `trunc(trunc(strength / (40 + U{0..=30})) + U[0, 2))`, capped.
    fn side_score<R: Rng + ?Sized>(&self, rng: &mut R, strength: u32) -> Score {
        let divisor = 40 + rng.gen_range(0..=30u32);
        let base = (strength / divisor) as f64;
        let luck = rng.gen_range(0.0..2.0);
        let goals = (base + luck).trunc();
        goals.min(self.score_cap as f64) as Score
    }
}
