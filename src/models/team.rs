// src/models/team.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub captain_id: Uuid,
    pub tournament_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to register a new team in a tournament. The captain is the
/// signed-in user making the request.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateTeamRequest {
    pub name: String,
    pub tournament_id: Uuid,
}

impl CreateTeamRequest {
    pub fn validate(&self) -> Result<(), String> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            return Err("Team name cannot be empty".to_string());
        }
        if trimmed.len() > 100 {
            return Err("Team name cannot exceed 100 characters".to_string());
        }
        Ok(())
    }

    pub fn sanitized_name(&self) -> String {
        self.name.trim().to_string()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
}
