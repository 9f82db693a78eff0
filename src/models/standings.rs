// src/models/standings.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One classification-table row. The whole row set of a tournament is
/// replaced on every recompute; `team_name` is a snapshot taken at
/// recompute time, not a live reference.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StandingRow {
    pub team_id: Uuid,
    pub team_name: String,
    pub played: i32,
    pub won: i32,
    pub drawn: i32,
    pub lost: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub goal_difference: i32,
    pub points: i32,
    pub tournament_id: Uuid,
}

impl StandingRow {
    pub fn zeroed(tournament_id: Uuid, team_id: Uuid, team_name: String) -> Self {
        Self {
            team_id,
            team_name,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            tournament_id,
        }
    }
}
