use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{LeagueRepository, MatchRepository, StoreResult, TeamRepository};
use crate::error::StoreError;
use crate::models::{
    Fixture, FixtureDraft, LeagueRecord, MatchId, Score, Team, TeamId, TeamSeed,
};

/// In-process backend. Also the payload of a [`super::StoreSnapshot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStore {
    teams: BTreeMap<TeamId, Team>,
    fixtures: BTreeMap<MatchId, Fixture>,
    league: LeagueRecord,
    next_fixture_id: MatchId,
}

impl MemoryStore {
    pub fn new(league: LeagueRecord) -> Self {
        Self { teams: BTreeMap::new(), fixtures: BTreeMap::new(), league, next_fixture_id: 1 }
    }

    /// Fresh store with teams numbered 1..=N in seed order.
    pub fn seeded(league_name: &str, seeds: &[TeamSeed]) -> Self {
        let mut store = Self::new(LeagueRecord::new(1, league_name));
        for (idx, seed) in seeds.iter().enumerate() {
            let id = idx as TeamId + 1;
            store.teams.insert(id, Team::new(id, seed.name.clone(), seed.strength));
        }
        store
    }

    pub fn fixture_count(&self) -> usize {
        self.fixtures.len()
    }
}

impl TeamRepository for MemoryStore {
    fn teams(&self) -> StoreResult<Vec<Team>> {
        Ok(self.teams.values().cloned().collect())
    }

    fn team(&self, id: TeamId) -> StoreResult<Option<Team>> {
        Ok(self.teams.get(&id).cloned())
    }

    fn team_by_name(&self, name: &str) -> StoreResult<Option<Team>> {
        Ok(self.teams.values().find(|t| t.name == name).cloned())
    }

    fn update_team(&mut self, team: &Team) -> StoreResult<()> {
        let slot =
            self.teams.get_mut(&team.id).ok_or_else(|| StoreError::not_found("team", team.id))?;
        *slot = team.clone();
        Ok(())
    }

    fn reset_teams(&mut self) -> StoreResult<()> {
        self.teams.values_mut().for_each(Team::reset_stats);
        Ok(())
    }
}

impl MatchRepository for MemoryStore {
    fn fixtures(&self) -> StoreResult<Vec<Fixture>> {
        Ok(self.fixtures.values().cloned().collect())
    }

    fn fixtures_by_week(&self, week: u32) -> StoreResult<Vec<Fixture>> {
        Ok(self.fixtures.values().filter(|f| f.week == week).cloned().collect())
    }

    fn unplayed_for_week(&self, week: u32) -> StoreResult<Vec<Fixture>> {
        Ok(self.fixtures.values().filter(|f| f.week == week && !f.played).cloned().collect())
    }

    fn fixture(&self, id: MatchId) -> StoreResult<Option<Fixture>> {
        Ok(self.fixtures.get(&id).cloned())
    }

    fn insert_fixtures(&mut self, drafts: Vec<FixtureDraft>) -> StoreResult<Vec<Fixture>> {
        for draft in &drafts {
            for team_id in [draft.home_team_id, draft.away_team_id] {
                if !self.teams.contains_key(&team_id) {
                    return Err(StoreError::Constraint(format!(
                        "fixture references unknown team {}",
                        team_id
                    )));
                }
            }
        }

        let mut inserted = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let fixture = draft.into_fixture(self.next_fixture_id);
            self.next_fixture_id += 1;
            self.fixtures.insert(fixture.id, fixture.clone());
            inserted.push(fixture);
        }
        Ok(inserted)
    }

    fn save_result(
        &mut self,
        id: MatchId,
        home_score: Score,
        away_score: Score,
    ) -> StoreResult<()> {
        let fixture =
            self.fixtures.get_mut(&id).ok_or_else(|| StoreError::not_found("match", id))?;
        fixture.home_score = home_score;
        fixture.away_score = away_score;
        fixture.played = true;
        Ok(())
    }

    fn clear_fixtures(&mut self) -> StoreResult<()> {
        self.fixtures.clear();
        Ok(())
    }
}

impl LeagueRepository for MemoryStore {
    fn league(&self) -> StoreResult<LeagueRecord> {
        Ok(self.league.clone())
    }

    fn update_league(&mut self, league: &LeagueRecord) -> StoreResult<()> {
        if league.id != self.league.id {
            return Err(StoreError::not_found("league", league.id));
        }
        self.league = league.clone();
        Ok(())
    }

    fn increment_week(&mut self) -> StoreResult<()> {
        self.league.current_week += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::seeded("Test League", &[TeamSeed::new("A", 50), TeamSeed::new("B", 60)])
    }

    #[test]
    fn test_seeded_ids_follow_seed_order() {
        let store = store();
        assert_eq!(store.team(1).unwrap().unwrap().name, "A");
        assert_eq!(store.team_by_name("B").unwrap().unwrap().id, 2);
        assert!(store.team(3).unwrap().is_none());
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let mut store = store();
        let drafts = vec![
            FixtureDraft { week: 1, home_team_id: 1, away_team_id: 2 },
            FixtureDraft { week: 2, home_team_id: 2, away_team_id: 1 },
        ];
        let inserted = store.insert_fixtures(drafts).unwrap();
        assert_eq!(inserted.iter().map(|f| f.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(store.unplayed_for_week(2).unwrap().len(), 1);

        store.save_result(2, 3, 1).unwrap();
        assert!(store.unplayed_for_week(2).unwrap().is_empty());
        assert_eq!(store.fixtures_by_week(2).unwrap()[0].home_score, 3);
    }

    #[test]
    fn test_insert_rejects_unknown_team() {
        let mut store = store();
        let result = store.insert_fixtures(vec![FixtureDraft {
            week: 1,
            home_team_id: 1,
            away_team_id: 9,
        }]);
        assert!(matches!(result, Err(StoreError::Constraint(_))));
        assert_eq!(store.fixture_count(), 0);
    }

    #[test]
    fn test_update_unknown_team_is_not_found() {
        let mut store = store();
        let ghost = Team::new(42, "Ghost", 10);
        assert!(matches!(store.update_team(&ghost), Err(StoreError::NotFound { .. })));
    }
}
