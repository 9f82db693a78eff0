// src/models/matches.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl From<String> for MatchStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "in_progress" => MatchStatus::InProgress,
            "completed" => MatchStatus::Completed,
            "cancelled" => MatchStatus::Cancelled,
            _ => MatchStatus::Scheduled,
        }
    }
}

/// A fixture between two teams of the same tournament. Scores stay null
/// until a result is recorded.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Match {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: MatchStatus,
    pub match_date: DateTime<Utc>,
    pub round: Option<String>,
    pub venue: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateMatchRequest {
    pub tournament_id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub match_date: DateTime<Utc>,
    pub round: Option<String>,
    pub venue: Option<String>,
}

impl CreateMatchRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.home_team_id == self.away_team_id {
            return Err("A team cannot play against itself".to_string());
        }
        Ok(())
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateMatchRequest {
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: Option<MatchStatus>,
    pub match_date: Option<DateTime<Utc>>,
    pub round: Option<String>,
    pub venue: Option<String>,
}
