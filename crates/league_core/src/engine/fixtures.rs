//! Double round-robin scheduling (circle method).

use std::collections::HashSet;

use tracing::info;

use crate::error::{LeagueError, Result};
use crate::models::{Fixture, FixtureDraft, Team, TeamId};
use crate::store::MatchRepository;

/// Build the full double round-robin for `team_ids`.
///
/// With an odd count one slot per week is a bye and that fixture is dropped.
/// Output is grouped by week ascending, slot order within a week. The second
/// half repeats the first with home and away swapped.
pub fn generate_fixtures(team_ids: &[TeamId]) -> Result<Vec<FixtureDraft>> {
    if team_ids.len() < 2 {
        return Err(LeagueError::InvalidInput(format!(
            "a league needs at least 2 teams, got {}",
            team_ids.len()
        )));
    }

    let mut seen = HashSet::with_capacity(team_ids.len());
    if let Some(dup) = team_ids.iter().find(|id| !seen.insert(**id)) {
        return Err(LeagueError::InvalidInput(format!("team {} listed twice", dup)));
    }

    // `None` is the bye.
    let mut slots: Vec<Option<TeamId>> = team_ids.iter().copied().map(Some).collect();
    if slots.len() % 2 != 0 {
        slots.push(None);
    }

    let n = slots.len();
    let half_weeks = n - 1;
    let per_week = n / 2;

    let mut first_half = Vec::with_capacity(half_weeks * per_week);
    for week in 0..half_weeks {
        for slot in 0..per_week {
            let home = (week + slot) % half_weeks;
            let away = if slot == 0 { n - 1 } else { (n - 1 - slot + week) % half_weeks };
            first_half.push((week, slots[home], slots[away]));
        }
    }

    let second_half = first_half
        .iter()
        .map(|&(week, home, away)| (week + half_weeks, away, home));

    let drafts = first_half
        .iter()
        .copied()
        .chain(second_half)
        .filter_map(|(week, home, away)| {
            Some(FixtureDraft {
                week: week as u32 + 1,
                home_team_id: home?,
                away_team_id: away?,
            })
        })
        .collect();

    Ok(drafts)
}

/// Number of weeks a season for `team_count` teams spans.
pub fn season_weeks(team_count: usize) -> u32 {
    let padded = team_count + team_count % 2;
    (2 * padded.saturating_sub(1)) as u32
}

/// Generate the season for `teams` and persist it in one bulk write.
pub fn schedule_season<R>(repo: &mut R, teams: &[Team]) -> Result<Vec<Fixture>>
where
    R: MatchRepository + ?Sized,
{
    let ids: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    let drafts = generate_fixtures(&ids)?;
    let fixtures = repo.insert_fixtures(drafts)?;

    info!(
        "Scheduled {} fixtures over {} weeks for {} teams",
        fixtures.len(),
        season_weeks(teams.len()),
        teams.len()
    );
    Ok(fixtures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn ids(n: u32) -> Vec<TeamId> {
        (1..=n).collect()
    }

    #[test]
    fn test_two_teams_two_weeks() {
        let drafts = generate_fixtures(&[10, 20]).unwrap();
        assert_eq!(
            drafts,
            vec![
                FixtureDraft { week: 1, home_team_id: 10, away_team_id: 20 },
                FixtureDraft { week: 2, home_team_id: 20, away_team_id: 10 },
            ]
        );
    }

    #[test]
    fn test_four_teams_schedule_shape() {
        let drafts = generate_fixtures(&ids(4)).unwrap();
        assert_eq!(drafts.len(), 12);
        assert_eq!(season_weeks(4), 6);
        for week in 1..=6 {
            assert_eq!(drafts.iter().filter(|d| d.week == week).count(), 2);
        }
        assert!(drafts.windows(2).all(|w| w[0].week <= w[1].week));
    }

    #[test]
    fn test_second_meeting_swaps_sides() {
        let drafts = generate_fixtures(&ids(4)).unwrap();
        let (first, second) = drafts.split_at(6);
        for (a, b) in first.iter().zip(second) {
            assert_eq!(b.week, a.week + 3);
            assert_eq!((b.home_team_id, b.away_team_id), (a.away_team_id, a.home_team_id));
        }
    }

    #[test]
    fn test_odd_count_uses_bye() {
        let drafts = generate_fixtures(&ids(5)).unwrap();
        assert_eq!(drafts.len(), 20);
        assert_eq!(season_weeks(5), 10);
        for week in 1..=10 {
            let playing: Vec<_> = drafts
                .iter()
                .filter(|d| d.week == week)
                .flat_map(|d| [d.home_team_id, d.away_team_id])
                .collect();
            assert_eq!(playing.len(), 4, "week {} should have one team resting", week);
        }
    }

    #[test]
    fn test_too_few_teams_rejected() {
        assert!(matches!(generate_fixtures(&[]), Err(LeagueError::InvalidInput(_))));
        assert!(matches!(generate_fixtures(&[1]), Err(LeagueError::InvalidInput(_))));
    }

    #[test]
    fn test_duplicate_team_rejected() {
        assert!(matches!(generate_fixtures(&[1, 2, 1]), Err(LeagueError::InvalidInput(_))));
    }

    proptest! {
        #[test]
        fn prop_every_pair_meets_twice(n in 2u32..=12) {
            let drafts = generate_fixtures(&ids(n)).unwrap();
            let n_usize = n as usize;

            prop_assert_eq!(drafts.len(), n_usize * (n_usize - 1));

            let weeks = season_weeks(n_usize);
            let expected_weeks = if n % 2 == 0 { 2 * (n - 1) } else { 2 * n };
            prop_assert_eq!(weeks, expected_weeks);

            for week in 1..=weeks {
                let in_week: Vec<_> = drafts.iter().filter(|d| d.week == week).collect();
                prop_assert_eq!(in_week.len(), n_usize / 2);

                let mut busy = HashSet::new();
                for d in &in_week {
                    prop_assert!(busy.insert(d.home_team_id));
                    prop_assert!(busy.insert(d.away_team_id));
                }
            }

            let mut meetings: HashMap<(TeamId, TeamId), u32> = HashMap::new();
            for d in &drafts {
                prop_assert_ne!(d.home_team_id, d.away_team_id);
                let key = (d.home_team_id.min(d.away_team_id), d.home_team_id.max(d.away_team_id));
                *meetings.entry(key).or_default() += 1;
            }
            prop_assert_eq!(meetings.len(), n_usize * (n_usize - 1) / 2);
            prop_assert!(meetings.values().all(|&count| count == 2));
        }
    }
}
