//! Monte Carlo championship odds.
//!
//! Each trial replays every unplayed fixture on top of the current points
//! table and records the trial winner. Trials are independent and run on the
//! rayon pool; trial `i` draws from its own `ChaCha8Rng` seeded with
//! `seed ^ i`, so a fixed seed reproduces the same odds on any thread count.

use std::collections::HashMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

use super::simulator::{MatchOutcome, MatchSimulator};
use super::standings::{DRAW_POINTS, WIN_POINTS};
use crate::config::DEFAULT_PREDICTION_TRIALS;
use crate::models::{Fixture, Prediction, Team, TeamId};

#[derive(Debug, Clone, Copy)]
pub struct ChampionshipPredictor {
    trials: u32,
    simulator: MatchSimulator,
}

impl Default for ChampionshipPredictor {
    fn default() -> Self {
        Self::new(DEFAULT_PREDICTION_TRIALS, MatchSimulator::default())
    }
}

impl ChampionshipPredictor {
    pub fn new(trials: u32, simulator: MatchSimulator) -> Self {
        Self { trials, simulator }
    }

    /// Odds per team, in the order of `standings`. Zero trials yields zero
    /// odds for everyone.
    pub fn predict(&self, standings: &[Team], fixtures: &[Fixture], seed: u64) -> Vec<Prediction> {
        let base_points: HashMap<TeamId, i32> =
            standings.iter().map(|t| (t.id, t.points)).collect();
        let remaining: Vec<&Fixture> = fixtures.iter().filter(|f| !f.played).collect();

        let counts = (0..self.trials)
            .into_par_iter()
            .filter_map(|trial| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed ^ u64::from(trial));
                self.run_trial(&base_points, &remaining, &mut rng)
            })
            .fold(HashMap::new, |mut acc: HashMap<TeamId, u32>, team_id| {
                *acc.entry(team_id).or_default() += 1;
                acc
            })
            .reduce(HashMap::new, |mut left, right| {
                for (team_id, count) in right {
                    *left.entry(team_id).or_default() += count;
                }
                left
            });

        debug!(
            "Ran {} prediction trials over {} remaining fixtures",
            self.trials,
            remaining.len()
        );

        standings
            .iter()
            .map(|team| {
                let wins = counts.get(&team.id).copied().unwrap_or(0);
                let championship_odds = if self.trials == 0 {
                    0.0
                } else {
                    f64::from(wins) / f64::from(self.trials) * 100.0
                };
                Prediction { team_id: team.id, team_name: team.name.clone(), championship_odds }
            })
            .collect()
    }

    /// Play out the remaining fixtures once and return the sole points leader.
    ///
    /// Current points stand in for strength here, not the team's rating.
    fn run_trial(
        &self,
        base_points: &HashMap<TeamId, i32>,
        remaining: &[&Fixture],
        rng: &mut ChaCha8Rng,
    ) -> Option<TeamId> {
        let mut points = base_points.clone();

        for fixture in remaining {
            let home = points.get(&fixture.home_team_id).copied().unwrap_or(0);
            let away = points.get(&fixture.away_team_id).copied().unwrap_or(0);
            let (home_score, away_score) =
                self.simulator.play(rng, home.max(0) as u32, away.max(0) as u32);

            match MatchOutcome::from_scores(home_score, away_score) {
                MatchOutcome::HomeWin => {
                    *points.entry(fixture.home_team_id).or_default() += WIN_POINTS
                }
                MatchOutcome::AwayWin => {
                    *points.entry(fixture.away_team_id).or_default() += WIN_POINTS
                }
                MatchOutcome::Draw => {
                    *points.entry(fixture.home_team_id).or_default() += DRAW_POINTS;
                    *points.entry(fixture.away_team_id).or_default() += DRAW_POINTS;
                }
            }
        }

        sole_leader(&points)
    }
}

/// The team with strictly more points than every other; `None` on a tie.
fn sole_leader(points: &HashMap<TeamId, i32>) -> Option<TeamId> {
    let mut leader: Option<(TeamId, i32)> = None;
    let mut tied = false;

    for (&team_id, &pts) in points {
        match leader {
            Some((_, best)) if pts < best => {}
            Some((_, best)) if pts == best => tied = true,
            _ => {
                leader = Some((team_id, pts));
                tied = false;
            }
        }
    }

    if tied {
        None
    } else {
        leader.map(|(team_id, _)| team_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: TeamId, points: i32) -> Team {
        let mut team = Team::new(id, format!("T{}", id), 50);
        team.points = points;
        team
    }

    fn fixture(id: u32, home: TeamId, away: TeamId, played: bool) -> Fixture {
        Fixture {
            id,
            week: 1,
            home_team_id: home,
            away_team_id: away,
            home_score: 0,
            away_score: 0,
            played,
        }
    }

    #[test]
    fn test_sole_leader_requires_strict_max() {
        let points: HashMap<_, _> = [(1, 9), (2, 7), (3, 9)].into_iter().collect();
        assert_eq!(sole_leader(&points), None);

        let points: HashMap<_, _> = [(1, 9), (2, 10), (3, 9)].into_iter().collect();
        assert_eq!(sole_leader(&points), Some(2));
    }

    #[test]
    fn test_settled_table_is_certain() {
        let standings = vec![team(1, 12), team(2, 3)];
        let fixtures = vec![fixture(1, 1, 2, true), fixture(2, 2, 1, true)];

        let odds = ChampionshipPredictor::default().predict(&standings, &fixtures, 5);
        assert_eq!(odds[0].championship_odds, 100.0);
        assert_eq!(odds[1].championship_odds, 0.0);
    }

    #[test]
    fn test_unreachable_leader_always_wins() {
        let standings = vec![team(1, 30), team(2, 0), team(3, 0)];
        let fixtures = vec![fixture(1, 2, 3, false), fixture(2, 3, 2, false)];

        let odds = ChampionshipPredictor::new(200, MatchSimulator::default())
            .predict(&standings, &fixtures, 11);
        assert_eq!(odds[0].championship_odds, 100.0);
    }

    #[test]
    fn test_zero_trials_gives_zero_odds() {
        let standings = vec![team(1, 9), team(2, 3)];
        let fixtures = vec![fixture(1, 1, 2, false)];

        let odds = ChampionshipPredictor::new(0, MatchSimulator::default())
            .predict(&standings, &fixtures, 3);
        assert!(odds.iter().all(|p| p.championship_odds == 0.0));
    }

    #[test]
    fn test_odds_sum_at_most_hundred_and_reproducible() {
        let standings = vec![team(1, 6), team(2, 6), team(3, 4), team(4, 1)];
        let fixtures = vec![
            fixture(1, 1, 2, false),
            fixture(2, 3, 4, false),
            fixture(3, 1, 3, false),
            fixture(4, 2, 4, false),
        ];
        let predictor = ChampionshipPredictor::default();

        let first = predictor.predict(&standings, &fixtures, 77);
        let second = predictor.predict(&standings, &fixtures, 77);
        assert_eq!(first, second);

        assert_eq!(first.len(), 4);
        let total: f64 = first.iter().map(|p| p.championship_odds).sum();
        assert!(total <= 100.0 + 1e-9);
        assert!(first.iter().all(|p| (0.0..=100.0).contains(&p.championship_odds)));
        assert_eq!(
            first.iter().map(|p| p.team_id).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
    }
}
