//! Week-advancement state machine.
//!
//! `NotStarted` (no fixtures) -> `InProgress` (some fixture unplayed) ->
//! `Completed` (none unplayed). The phase is always derived from the store;
//! the service itself keeps no league state besides its RNG.

use std::collections::HashMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::fixtures::schedule_season;
use super::predictor::ChampionshipPredictor;
use super::simulator::MatchSimulator;
use super::standings::{self, ranked};
use crate::config::LeagueConfig;
use crate::error::{LeagueError, Result};
use crate::models::{
    Fixture, LeaguePhase, LeagueRecord, MatchId, MatchReport, Prediction, Score, Team, TeamId,
};
use crate::store::LeagueStore;

/// Result of a single week advance.
#[derive(Debug, Clone, Serialize)]
pub struct WeekOutcome {
    /// The week whose fixtures were played.
    pub week: u32,
    pub played: Vec<Fixture>,
    /// Set once no unplayed fixture remains.
    pub champion: Option<Team>,
}

/// Result of playing the season to completion.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonOutcome {
    pub matches: Vec<MatchReport>,
    pub champion: Team,
}

pub struct LeagueService<S> {
    store: S,
    config: LeagueConfig,
    simulator: MatchSimulator,
    predictor: ChampionshipPredictor,
    rng: ChaCha8Rng,
}

impl<S: LeagueStore> LeagueService<S> {
    /// Fails with [`LeagueError::Config`] if `config` does not validate.
    pub fn new(store: S, config: LeagueConfig) -> Result<Self> {
        config.validate()?;

        let simulator = MatchSimulator::new(config.score_cap);
        let predictor = ChampionshipPredictor::new(config.prediction_trials, simulator);
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self { store, config, simulator, predictor, rng })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn phase(&self) -> Result<LeaguePhase> {
        let fixtures = self.store.fixtures()?;
        Ok(if fixtures.is_empty() {
            LeaguePhase::NotStarted
        } else if fixtures.iter().any(|f| !f.played) {
            LeaguePhase::InProgress
        } else {
            LeaguePhase::Completed
        })
    }

    /// Generate the schedule and open week 1.
    pub fn start_league(&mut self) -> Result<()> {
        if self.phase()? != LeaguePhase::NotStarted {
            warn!("Start requested while fixtures already exist");
            return Err(LeagueError::DomainRule(
                "league already started; restart it first".to_string(),
            ));
        }

        let teams = self.store.teams()?;
        let fixtures = schedule_season(&mut self.store, &teams)?;
        let total_weeks = fixtures.iter().map(|f| f.week).max().unwrap_or(0);

        let mut league = self.store.league()?;
        league.current_week = 1;
        league.total_weeks = total_weeks;
        league.champion = None;
        self.store.update_league(&league)?;

        info!("League '{}' started: {} teams, {} weeks", league.name, teams.len(), total_weeks);
        Ok(())
    }

    /// Play every unplayed fixture of the current week, then advance the week.
    ///
    /// Starts the league on first use. Once completed, further calls play
    /// nothing and only report the champion.
    pub fn next_week(&mut self) -> Result<WeekOutcome> {
        match self.phase()? {
            LeaguePhase::NotStarted => self.start_league()?,
            LeaguePhase::InProgress => {}
            LeaguePhase::Completed => {
                let week = self.store.league()?.current_week;
                let champion = self.crown_champion()?;
                return Ok(WeekOutcome { week, played: Vec::new(), champion: Some(champion) });
            }
        }

        let week = self.store.league()?.current_week;
        let fixtures = self.store.unplayed_for_week(week)?;

        let mut played = Vec::with_capacity(fixtures.len());
        for fixture in fixtures {
            played.push(self.play_fixture(fixture)?);
        }

        self.store.increment_week()?;
        info!("Week {} played ({} matches)", week, played.len());

        let champion = if self.has_unplayed()? { None } else { Some(self.crown_champion()?) };
        Ok(WeekOutcome { week, played, champion })
    }

    /// Play every remaining fixture regardless of week and crown the champion.
    pub fn play_all(&mut self) -> Result<SeasonOutcome> {
        if self.phase()? == LeaguePhase::NotStarted {
            self.start_league()?;
        }

        let mut fixtures = self.store.fixtures()?;
        fixtures.sort_by_key(|f| (f.week, f.id));

        let mut count = 0;
        for fixture in fixtures.into_iter().filter(|f| !f.played) {
            self.play_fixture(fixture)?;
            count += 1;
        }

        let mut league = self.store.league()?;
        league.current_week = league.current_week.max(league.total_weeks + 1);
        self.store.update_league(&league)?;
        info!("Played remaining {} matches", count);

        let champion = self.crown_champion()?;
        Ok(SeasonOutcome { matches: self.all_matches()?, champion })
    }

    /// Re-record the score of `match_id`.
    ///
    /// The previous result is reversed before the new one is applied. A
    /// fixture that was already played keeps its appearance count; a fixture
    /// that was not counts one appearance for each side.
    pub fn update_match(
        &mut self,
        match_id: MatchId,
        home_score: Score,
        away_score: Score,
    ) -> Result<Fixture> {
        let Some(existing) = self.store.fixture(match_id)? else {
            warn!("Correction requested for unknown match {}", match_id);
            return Err(LeagueError::DomainRule(format!(
                "cannot correct match {}: it does not exist",
                match_id
            )));
        };

        standings::update_team_stats_reverse(&mut self.store, &existing)?;

        self.store.save_result(match_id, home_score, away_score)?;

        standings::update_team_stats(
            &mut self.store,
            existing.home_team_id,
            existing.away_team_id,
            home_score,
            away_score,
            existing.played,
        )?;

        debug!(
            "Corrected match {} from {}-{} to {}-{}",
            match_id, existing.home_score, existing.away_score, home_score, away_score
        );

        Ok(Fixture { home_score, away_score, played: true, ..existing })
    }

    /// Drop the schedule, zero every team and reset the league record.
    pub fn restart_league(&mut self) -> Result<()> {
        self.store.clear_fixtures()?;
        self.store.reset_teams()?;

        let mut league = self.store.league()?;
        league.reset();
        self.store.update_league(&league)?;

        info!("League '{}' restarted", league.name);
        Ok(())
    }

    pub fn standings(&self) -> Result<Vec<Team>> {
        Ok(ranked(self.store.teams()?))
    }

    pub fn teams(&self) -> Result<Vec<Team>> {
        Ok(self.store.teams()?)
    }

    pub fn league(&self) -> Result<LeagueRecord> {
        Ok(self.store.league()?)
    }

    /// Played fixtures of the most recently completed week.
    pub fn week_results(&self) -> Result<Vec<MatchReport>> {
        let current_week = self.store.league()?.current_week;
        if current_week <= 1 {
            return Ok(Vec::new());
        }

        let fixtures: Vec<Fixture> = self
            .store
            .fixtures_by_week(current_week - 1)?
            .into_iter()
            .filter(|f| f.played)
            .collect();
        self.reports(fixtures)
    }

    pub fn matches_by_week(&self, week: u32) -> Result<Vec<MatchReport>> {
        let total_weeks = self.store.league()?.total_weeks;
        if week == 0 || week > total_weeks {
            return Err(LeagueError::InvalidInput(format!(
                "week {} is outside 1..={}",
                week, total_weeks
            )));
        }
        self.reports(self.store.fixtures_by_week(week)?)
    }

    pub fn all_matches(&self) -> Result<Vec<MatchReport>> {
        self.reports(self.store.fixtures()?)
    }

    /// Monte Carlo championship odds over the remaining schedule.
    pub fn predictions(&self) -> Result<Vec<Prediction>> {
        let league = self.store.league()?;
        if league.current_week < self.config.prediction_min_week {
            warn!("Predictions requested in week {}", league.current_week);
            return Err(LeagueError::DomainRule(format!(
                "championship predictions are only available from week {} (current week {})",
                self.config.prediction_min_week, league.current_week
            )));
        }

        let seed = match self.config.seed {
            Some(seed) => seed ^ u64::from(league.current_week),
            None => rand::random(),
        };

        let table = self.standings()?;
        let fixtures = self.store.fixtures()?;
        Ok(self.predictor.predict(&table, &fixtures, seed))
    }

    fn play_fixture(&mut self, fixture: Fixture) -> Result<Fixture> {
        let home = self.require_team(fixture.home_team_id)?;
        let away = self.require_team(fixture.away_team_id)?;

        let (home_score, away_score) =
            self.simulator.play(&mut self.rng, home.strength, away.strength);

        self.store.save_result(fixture.id, home_score, away_score)?;
        standings::update_team_stats(
            &mut self.store,
            home.id,
            away.id,
            home_score,
            away_score,
            false,
        )?;

        debug!(
            "Week {}: {} {}-{} {}",
            fixture.week, home.name, home_score, away_score, away.name
        );

        Ok(Fixture { home_score, away_score, played: true, ..fixture })
    }

    fn require_team(&self, id: TeamId) -> Result<Team> {
        self.store.team(id)?.ok_or_else(|| LeagueError::not_found("team", id))
    }

    fn has_unplayed(&self) -> Result<bool> {
        Ok(self.store.fixtures()?.iter().any(|f| !f.played))
    }

    /// Record the current table leader as champion and return it.
    fn crown_champion(&mut self) -> Result<Team> {
        let champion = self
            .standings()?
            .into_iter()
            .next()
            .ok_or_else(|| LeagueError::DomainRule("league has no teams".to_string()))?;

        let mut league = self.store.league()?;
        if league.champion.as_deref() != Some(champion.name.as_str()) {
            league.champion = Some(champion.name.clone());
            self.store.update_league(&league)?;
            info!("{} are champions with {} points", champion.name, champion.points);
        }
        Ok(champion)
    }

    fn reports(&self, mut fixtures: Vec<Fixture>) -> Result<Vec<MatchReport>> {
        let names: HashMap<TeamId, String> =
            self.store.teams()?.into_iter().map(|t| (t.id, t.name)).collect();
        let name_of = |id: TeamId| {
            names.get(&id).map(String::as_str).ok_or_else(|| LeagueError::not_found("team", id))
        };

        fixtures.sort_by_key(|f| (f.week, f.id));
        fixtures
            .iter()
            .map(|f| -> Result<MatchReport> {
                Ok(MatchReport::new(f, name_of(f.home_team_id)?, name_of(f.away_team_id)?))
            })
            .collect()
    }
}
