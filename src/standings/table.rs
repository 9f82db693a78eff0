use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Deserialize;
use uuid::Uuid;

use crate::models::matches::{Match, MatchStatus};
use crate::models::standings::StandingRow;

/// Display name used when a match references a team id that is missing
/// from the tournament's team set.
pub const FALLBACK_TEAM_NAME: &str = "Team";

/// What to do with a completed match that is missing one or both scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingScorePolicy {
    /// Count the missing side as 0 goals.
    #[default]
    TreatAsZero,
    /// Leave the match out of the table entirely.
    Exclude,
}

enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

/// Fold completed matches into one classification row per team.
///
/// Only `completed` matches contribute. Rows are keyed by team id on first
/// appearance; a team id absent from `team_names` gets [`FALLBACK_TEAM_NAME`].
/// Every step is an addition, so the result does not depend on the order of
/// `matches`. The returned rows are sorted by points desc, goal difference
/// desc, goals for desc, team name asc.
pub fn aggregate_standings(
    tournament_id: Uuid,
    matches: &[Match],
    team_names: &HashMap<Uuid, String>,
    policy: MissingScorePolicy,
) -> Vec<StandingRow> {
    let mut table: HashMap<Uuid, StandingRow> = HashMap::new();

    for game in matches {
        if game.status != MatchStatus::Completed {
            continue;
        }
        if policy == MissingScorePolicy::Exclude
            && (game.home_score.is_none() || game.away_score.is_none())
        {
            continue;
        }
        let home_score = game.home_score.unwrap_or(0);
        let away_score = game.away_score.unwrap_or(0);

        let (home_outcome, away_outcome) = match home_score.cmp(&away_score) {
            Ordering::Greater => (MatchOutcome::Win, MatchOutcome::Loss),
            Ordering::Less => (MatchOutcome::Loss, MatchOutcome::Win),
            Ordering::Equal => (MatchOutcome::Draw, MatchOutcome::Draw),
        };

        let mut apply = |team_id: Uuid, goals_for: i32, goals_against: i32, outcome: MatchOutcome| {
            let row = table.entry(team_id).or_insert_with(|| {
                let name = team_names
                    .get(&team_id)
                    .cloned()
                    .unwrap_or_else(|| FALLBACK_TEAM_NAME.to_string());
                StandingRow::zeroed(tournament_id, team_id, name)
            });
            row.played += 1;
            row.goals_for += goals_for;
            row.goals_against += goals_against;
            row.goal_difference = row.goals_for - row.goals_against;
            match outcome {
                MatchOutcome::Win => {
                    row.won += 1;
                    row.points += 3;
                }
                MatchOutcome::Draw => {
                    row.drawn += 1;
                    row.points += 1;
                }
                MatchOutcome::Loss => {
                    row.lost += 1;
                }
            }
        };

        apply(game.home_team_id, home_score, away_score, home_outcome);
        apply(game.away_team_id, away_score, home_score, away_outcome);
    }

    let mut rows: Vec<StandingRow> = table.into_values().collect();
    sort_table(&mut rows);
    rows
}

/// Classification order: points, then goal difference, then goals scored,
/// with team name as the deterministic last key.
pub fn sort_table(rows: &mut [StandingRow]) {
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_difference.cmp(&a.goal_difference))
            .then_with(|| b.goals_for.cmp(&a.goals_for))
            .then_with(|| a.team_name.cmp(&b.team_name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn match_with_status(
        tournament_id: Uuid,
        home: Uuid,
        away: Uuid,
        home_score: Option<i32>,
        away_score: Option<i32>,
        status: MatchStatus,
    ) -> Match {
        Match {
            id: Uuid::new_v4(),
            tournament_id,
            home_team_id: home,
            away_team_id: away,
            home_score,
            away_score,
            status,
            match_date: Utc::now(),
            round: None,
            venue: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn completed(tournament_id: Uuid, home: Uuid, away: Uuid, hs: i32, aws: i32) -> Match {
        match_with_status(
            tournament_id,
            home,
            away,
            Some(hs),
            Some(aws),
            MatchStatus::Completed,
        )
    }

    fn names(teams: &[(Uuid, &str)]) -> HashMap<Uuid, String> {
        teams.iter().map(|(id, n)| (*id, n.to_string())).collect()
    }

    fn row_for(rows: &[StandingRow], team_id: Uuid) -> &StandingRow {
        rows.iter().find(|r| r.team_id == team_id).unwrap()
    }

    #[test]
    fn no_matches_yields_empty_table() {
        let rows = aggregate_standings(
            Uuid::new_v4(),
            &[],
            &HashMap::new(),
            MissingScorePolicy::TreatAsZero,
        );
        assert!(rows.is_empty());
    }

    #[test]
    fn home_win_two_one() {
        let tournament = Uuid::new_v4();
        let home = Uuid::new_v4();
        let away = Uuid::new_v4();
        let matches = vec![completed(tournament, home, away, 2, 1)];
        let rows = aggregate_standings(
            tournament,
            &matches,
            &names(&[(home, "Lions"), (away, "Tigers")]),
            MissingScorePolicy::TreatAsZero,
        );

        assert_eq!(rows.len(), 2);
        // Winner sorts first
        assert_eq!(rows[0].team_id, home);

        let home_row = row_for(&rows, home);
        assert_eq!(home_row.team_name, "Lions");
        assert_eq!(
            (home_row.played, home_row.won, home_row.drawn, home_row.lost),
            (1, 1, 0, 0)
        );
        assert_eq!(
            (home_row.goals_for, home_row.goals_against, home_row.goal_difference),
            (2, 1, 1)
        );
        assert_eq!(home_row.points, 3);

        let away_row = row_for(&rows, away);
        assert_eq!(
            (away_row.played, away_row.won, away_row.drawn, away_row.lost),
            (1, 0, 0, 1)
        );
        assert_eq!(
            (away_row.goals_for, away_row.goals_against, away_row.goal_difference),
            (1, 2, -1)
        );
        assert_eq!(away_row.points, 0);
    }

    #[test]
    fn draw_gives_both_teams_one_point() {
        let tournament = Uuid::new_v4();
        let home = Uuid::new_v4();
        let away = Uuid::new_v4();
        let matches = vec![completed(tournament, home, away, 1, 1)];
        let rows = aggregate_standings(
            tournament,
            &matches,
            &names(&[(home, "Lions"), (away, "Tigers")]),
            MissingScorePolicy::TreatAsZero,
        );

        for row in &rows {
            assert_eq!(row.played, 1);
            assert_eq!(row.drawn, 1);
            assert_eq!(row.points, 1);
            assert_eq!(row.goal_difference, 0);
        }
    }

    #[test]
    fn non_completed_matches_are_excluded() {
        let tournament = Uuid::new_v4();
        let home = Uuid::new_v4();
        let away = Uuid::new_v4();
        let matches = vec![
            match_with_status(tournament, home, away, None, None, MatchStatus::Scheduled),
            match_with_status(tournament, home, away, Some(1), Some(0), MatchStatus::InProgress),
            match_with_status(tournament, home, away, Some(3), Some(0), MatchStatus::Cancelled),
        ];
        let rows = aggregate_standings(
            tournament,
            &matches,
            &names(&[(home, "Lions"), (away, "Tigers")]),
            MissingScorePolicy::TreatAsZero,
        );
        assert!(rows.is_empty());
    }

    #[test]
    fn aggregation_is_order_independent() {
        let tournament = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let team_names = names(&[(a, "Alpha"), (b, "Beta"), (c, "Gamma")]);
        let matches = vec![
            completed(tournament, a, b, 2, 0),
            completed(tournament, b, c, 1, 1),
            completed(tournament, c, a, 0, 3),
            completed(tournament, a, c, 2, 2),
        ];
        let mut reversed = matches.clone();
        reversed.reverse();

        let forward =
            aggregate_standings(tournament, &matches, &team_names, MissingScorePolicy::TreatAsZero);
        let backward =
            aggregate_standings(tournament, &reversed, &team_names, MissingScorePolicy::TreatAsZero);

        assert_eq!(forward, backward);
    }

    #[test]
    fn points_sum_matches_decisive_and_drawn_counts() {
        let tournament = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        // 2 decisive, 1 drawn
        let matches = vec![
            completed(tournament, a, b, 1, 0),
            completed(tournament, b, c, 2, 2),
            completed(tournament, c, a, 0, 4),
        ];
        let rows = aggregate_standings(
            tournament,
            &matches,
            &names(&[(a, "Alpha"), (b, "Beta"), (c, "Gamma")]),
            MissingScorePolicy::TreatAsZero,
        );

        let total_points: i32 = rows.iter().map(|r| r.points).sum();
        assert_eq!(total_points, 3 * 2 + 2 * 1);

        for row in &rows {
            assert_eq!(row.played, row.won + row.drawn + row.lost);
            assert_eq!(row.goal_difference, row.goals_for - row.goals_against);
        }
    }

    #[test]
    fn missing_scores_count_as_goalless_draw_by_default() {
        let tournament = Uuid::new_v4();
        let home = Uuid::new_v4();
        let away = Uuid::new_v4();
        let matches = vec![match_with_status(
            tournament,
            home,
            away,
            None,
            None,
            MatchStatus::Completed,
        )];
        let rows = aggregate_standings(
            tournament,
            &matches,
            &names(&[(home, "Lions"), (away, "Tigers")]),
            MissingScorePolicy::TreatAsZero,
        );

        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.played, 1);
            assert_eq!(row.drawn, 1);
            assert_eq!(row.points, 1);
            assert_eq!(row.goals_for, 0);
        }
    }

    #[test]
    fn exclude_policy_skips_matches_without_scores() {
        let tournament = Uuid::new_v4();
        let home = Uuid::new_v4();
        let away = Uuid::new_v4();
        let matches = vec![
            match_with_status(tournament, home, away, Some(1), None, MatchStatus::Completed),
            completed(tournament, home, away, 1, 0),
        ];
        let rows = aggregate_standings(
            tournament,
            &matches,
            &names(&[(home, "Lions"), (away, "Tigers")]),
            MissingScorePolicy::Exclude,
        );

        // Only the fully scored match counts
        let home_row = row_for(&rows, home);
        assert_eq!(home_row.played, 1);
        assert_eq!(home_row.points, 3);
    }

    #[test]
    fn unknown_team_id_gets_fallback_name() {
        let tournament = Uuid::new_v4();
        let home = Uuid::new_v4();
        let away = Uuid::new_v4();
        let matches = vec![completed(tournament, home, away, 0, 2)];
        let rows = aggregate_standings(
            tournament,
            &matches,
            &names(&[(home, "Lions")]),
            MissingScorePolicy::TreatAsZero,
        );

        assert_eq!(row_for(&rows, away).team_name, FALLBACK_TEAM_NAME);
    }

    #[test]
    fn table_sorts_on_points_then_goal_difference() {
        let tournament = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let d = Uuid::new_v4();
        let matches = vec![
            // a beats d heavily, b beats d narrowly: both on 3 points,
            // a ahead on goal difference
            completed(tournament, a, d, 4, 0),
            completed(tournament, b, d, 1, 0),
            // c draws with d: 1 point
            completed(tournament, c, d, 2, 2),
        ];
        let rows = aggregate_standings(
            tournament,
            &matches,
            &names(&[(a, "Alpha"), (b, "Beta"), (c, "Gamma"), (d, "Delta")]),
            MissingScorePolicy::TreatAsZero,
        );

        let order: Vec<Uuid> = rows.iter().map(|r| r.team_id).collect();
        assert_eq!(&order[..3], &[a, b, c]);
        for pair in rows.windows(2) {
            assert!(pair[0].points >= pair[1].points);
            if pair[0].points == pair[1].points {
                assert!(pair[0].goal_difference >= pair[1].goal_difference);
            }
        }
    }
}
