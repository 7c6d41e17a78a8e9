//! Points table maintenance.
//!
//! `apply_result` and `reverse_result` are exact mirrors for points, wins,
//! draws, losses and goals. They are NOT mirrors for `matches`: applying
//! increments it unless flagged as a correction, reversing never decrements
//! it. Corrections rely on that pairing (reverse, then apply as correction).

use tracing::debug;

use super::simulator::MatchOutcome;
use crate::error::{LeagueError, Result};
use crate::models::{Fixture, Score, Team, TeamId};
use crate::store::TeamRepository;

pub const WIN_POINTS: i32 = 3;
pub const DRAW_POINTS: i32 = 1;

pub fn apply_result(
    home: &mut Team,
    away: &mut Team,
    home_score: Score,
    away_score: Score,
    is_correction: bool,
) {
    match MatchOutcome::from_scores(home_score, away_score) {
        MatchOutcome::HomeWin => {
            home.wins += 1;
            home.points += WIN_POINTS;
            away.losses += 1;
        }
        MatchOutcome::AwayWin => {
            away.wins += 1;
            away.points += WIN_POINTS;
            home.losses += 1;
        }
        MatchOutcome::Draw => {
            home.draws += 1;
            away.draws += 1;
            home.points += DRAW_POINTS;
            away.points += DRAW_POINTS;
        }
    }

    if !is_correction {
        home.matches += 1;
        away.matches += 1;
    }

    exchange_goals(home, away, i32::from(home_score), i32::from(away_score));
}

/// Undo the effect of a previously applied `fixture`. Unplayed fixtures
/// carry no effect and are left alone.
pub fn reverse_result(home: &mut Team, away: &mut Team, fixture: &Fixture) {
    if !fixture.played {
        return;
    }

    match MatchOutcome::from_scores(fixture.home_score, fixture.away_score) {
        MatchOutcome::HomeWin => {
            home.wins -= 1;
            home.points -= WIN_POINTS;
            away.losses -= 1;
        }
        MatchOutcome::AwayWin => {
            away.wins -= 1;
            away.points -= WIN_POINTS;
            home.losses -= 1;
        }
        MatchOutcome::Draw => {
            home.draws -= 1;
            away.draws -= 1;
            home.points -= DRAW_POINTS;
            away.points -= DRAW_POINTS;
        }
    }

    exchange_goals(home, away, -i32::from(fixture.home_score), -i32::from(fixture.away_score));
}

fn exchange_goals(home: &mut Team, away: &mut Team, home_goals: i32, away_goals: i32) {
    home.goals_for += home_goals;
    home.goals_against += away_goals;
    home.refresh_goal_difference();

    away.goals_for += away_goals;
    away.goals_against += home_goals;
    away.refresh_goal_difference();
}

/// Sort by points, goal difference, goals scored (all descending). Stable:
/// teams equal on all three keep their incoming order.
pub fn rank(teams: &mut [Team]) {
    teams.sort_by(|a, b| b.ranking_key().cmp(&a.ranking_key()));
}

pub fn ranked(mut teams: Vec<Team>) -> Vec<Team> {
    rank(&mut teams);
    teams
}

fn load_pair<R>(repo: &R, home_id: TeamId, away_id: TeamId) -> Result<(Team, Team)>
where
    R: TeamRepository + ?Sized,
{
    let home = repo.team(home_id)?.ok_or_else(|| LeagueError::not_found("team", home_id))?;
    let away = repo.team(away_id)?.ok_or_else(|| LeagueError::not_found("team", away_id))?;
    Ok((home, away))
}

/// Load both teams, apply the result and persist them.
pub fn update_team_stats<R>(
    repo: &mut R,
    home_id: TeamId,
    away_id: TeamId,
    home_score: Score,
    away_score: Score,
    is_correction: bool,
) -> Result<()>
where
    R: TeamRepository + ?Sized,
{
    let (mut home, mut away) = load_pair(repo, home_id, away_id)?;
    apply_result(&mut home, &mut away, home_score, away_score, is_correction);

    repo.update_team(&home)?;
    repo.update_team(&away)?;
    Ok(())
}

/// Load both teams of `fixture`, undo its recorded result and persist them.
pub fn update_team_stats_reverse<R>(repo: &mut R, fixture: &Fixture) -> Result<()>
where
    R: TeamRepository + ?Sized,
{
    let (mut home, mut away) = load_pair(repo, fixture.home_team_id, fixture.away_team_id)?;
    reverse_result(&mut home, &mut away, fixture);

    debug!(
        "Reversed match {} ({}-{}) for {} and {}",
        fixture.id, fixture.home_score, fixture.away_score, home.name, away.name
    );

    repo.update_team(&home)?;
    repo.update_team(&away)?;
    Ok(())
}
