use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::matches::Match;
use crate::models::standings::StandingRow;
use crate::models::team::Team;
use crate::standings::table::{aggregate_standings, MissingScorePolicy};

/// Failure talking to the standings store. Propagates to the caller
/// unchanged; the engine performs no retries.
#[derive(Debug, thiserror::Error)]
pub enum DataAccessError {
    #[error("standings store query failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// Service responsible for recomputing and reading a tournament's
/// classification table.
///
/// `recompute` is the only mutator of the `standings` table. The
/// delete+insert replace runs inside one transaction, so a concurrent
/// `fetch` sees either the previous table or the new one, never a
/// partially rebuilt state.
pub struct StandingsEngine {
    pool: PgPool,
    missing_score_policy: MissingScorePolicy,
}

impl StandingsEngine {
    pub fn new(pool: PgPool) -> Self {
        Self::with_policy(pool, MissingScorePolicy::default())
    }

    pub fn with_policy(pool: PgPool, missing_score_policy: MissingScorePolicy) -> Self {
        Self {
            pool,
            missing_score_policy,
        }
    }

    /// Rebuild the persisted standings for a tournament from its completed
    /// matches. An unknown tournament id yields an empty table, not an error.
    #[tracing::instrument(name = "Recompute standings", skip(self))]
    pub async fn recompute(&self, tournament_id: Uuid) -> Result<(), DataAccessError> {
        let matches = self.list_completed_matches(tournament_id).await?;
        let team_names = self.team_name_lookup(tournament_id).await?;

        let rows = aggregate_standings(
            tournament_id,
            &matches,
            &team_names,
            self.missing_score_policy,
        );

        self.replace_standings(tournament_id, &rows).await?;

        tracing::info!(
            "Recomputed standings for tournament {}: {} teams from {} completed matches",
            tournament_id,
            rows.len(),
            matches.len()
        );
        Ok(())
    }

    /// Read the persisted table, best placed first.
    #[tracing::instrument(name = "Fetch standings", skip(self))]
    pub async fn fetch(&self, tournament_id: Uuid) -> Result<Vec<StandingRow>, DataAccessError> {
        let rows = sqlx::query_as::<_, StandingRow>(
            r#"
            SELECT team_id, team_name, played, won, drawn, lost,
                   goals_for, goals_against, goal_difference, points, tournament_id
            FROM standings
            WHERE tournament_id = $1
            ORDER BY points DESC, goal_difference DESC, goals_for DESC, team_name ASC
            "#,
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_completed_matches(
        &self,
        tournament_id: Uuid,
    ) -> Result<Vec<Match>, DataAccessError> {
        let matches = sqlx::query_as::<_, Match>(
            "SELECT * FROM matches WHERE tournament_id = $1 AND status = 'completed'",
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(matches)
    }

    async fn team_name_lookup(
        &self,
        tournament_id: Uuid,
    ) -> Result<HashMap<Uuid, String>, DataAccessError> {
        let teams = sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE tournament_id = $1")
            .bind(tournament_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(teams.into_iter().map(|t| (t.id, t.name)).collect())
    }

    /// Replace the tournament's row set in a single transaction.
    async fn replace_standings(
        &self,
        tournament_id: Uuid,
        rows: &[StandingRow],
    ) -> Result<(), DataAccessError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM standings WHERE tournament_id = $1")
            .bind(tournament_id)
            .execute(&mut *tx)
            .await?;

        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO standings (
                    tournament_id, team_id, team_name, played, won, drawn, lost,
                    goals_for, goals_against, goal_difference, points, updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW())
                "#,
            )
            .bind(row.tournament_id)
            .bind(row.team_id)
            .bind(&row.team_name)
            .bind(row.played)
            .bind(row.won)
            .bind(row.drawn)
            .bind(row.lost)
            .bind(row.goals_for)
            .bind(row.goals_against)
            .bind(row.goal_difference)
            .bind(row.points)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
