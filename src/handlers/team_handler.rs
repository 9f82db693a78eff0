use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::middleware::auth::Claims;
use crate::models::team::{CreateTeamRequest, Team, UpdateTeamRequest};

/// Register a new team. The signed-in user becomes its captain.
#[tracing::instrument(
    name = "Register team",
    skip(request, pool, claims),
    fields(
        team_name = %request.name,
        user = %claims.username
    )
)]
pub async fn create_team(
    request: web::Json<CreateTeamRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    if let Err(validation_error) = request.validate() {
        tracing::warn!("Team registration validation failed: {}", validation_error);
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": validation_error
        })));
    }

    let captain_id = match claims.user_id() {
        Some(id) => id,
        None => {
            tracing::error!("Invalid user ID in claims: {}", claims.sub);
            return Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Invalid user ID"
            })));
        }
    };

    // The tournament must exist before teams can join it
    let tournament_exists = sqlx::query("SELECT id FROM tournaments WHERE id = $1")
        .bind(request.tournament_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!("Database error checking tournament: {}", e);
            actix_web::error::ErrorInternalServerError("Database error")
        })?;

    if tournament_exists.is_none() {
        return Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "Tournament not found"
        })));
    }

    let sanitized_name = request.sanitized_name();
    let now = Utc::now();

    let inserted = sqlx::query_as::<_, Team>(
        r#"
        INSERT INTO teams (id, name, captain_id, tournament_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&sanitized_name)
    .bind(captain_id)
    .bind(request.tournament_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool.get_ref())
    .await;

    match inserted {
        Ok(team) => {
            tracing::info!("Created team '{}' with ID: {}", team.name, team.id);
            Ok(HttpResponse::Created().json(json!({
                "success": true,
                "data": team
            })))
        }
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return Ok(HttpResponse::Conflict().json(json!({
                        "success": false,
                        "message": "Team name already taken in this tournament"
                    })));
                }
            }
            tracing::error!("Failed to create team: {}", e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to create team"
            })))
        }
    }
}

pub async fn get_team(team_id: Uuid, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let team = sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1")
        .bind(team_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!("Database error getting team: {}", e);
            actix_web::error::ErrorInternalServerError("Database error")
        })?;

    match team {
        Some(team) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": team
        }))),
        None => Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "Team not found"
        }))),
    }
}

/// List a tournament's teams, alphabetically
pub async fn get_teams_by_tournament(
    tournament_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let teams = sqlx::query_as::<_, Team>(
        "SELECT * FROM teams WHERE tournament_id = $1 ORDER BY name ASC",
    )
    .bind(tournament_id)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!("Database error listing teams: {}", e);
        actix_web::error::ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": teams
    })))
}

#[tracing::instrument(name = "Update team", skip(request, pool))]
pub async fn update_team(
    team_id: Uuid,
    request: web::Json<UpdateTeamRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    if let Some(name) = &request.name {
        if name.trim().is_empty() {
            return Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Team name cannot be empty"
            })));
        }
    }

    let updated = sqlx::query_as::<_, Team>(
        r#"
        UPDATE teams
        SET name = COALESCE($2, name),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(team_id)
    .bind(request.name.as_ref().map(|n| n.trim().to_string()))
    .fetch_optional(pool.get_ref())
    .await;

    match updated {
        Ok(Some(team)) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": team
        }))),
        Ok(None) => Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "Team not found"
        }))),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return Ok(HttpResponse::Conflict().json(json!({
                        "success": false,
                        "message": "Team name already taken in this tournament"
                    })));
                }
            }
            tracing::error!("Failed to update team: {}", e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to update team"
            })))
        }
    }
}

#[tracing::instrument(name = "Delete team", skip(pool))]
pub async fn delete_team(team_id: Uuid, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let result = sqlx::query("DELETE FROM teams WHERE id = $1")
        .bind(team_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete team: {}", e);
            actix_web::error::ErrorInternalServerError("Database error")
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "Team not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Team deleted"
    })))
}
