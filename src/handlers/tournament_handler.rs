use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::middleware::auth::Claims;
use crate::models::tournament::{
    CreateTournamentRequest, Tournament, TournamentStatus, UpdateTournamentRequest,
};

/// Create a new tournament
#[tracing::instrument(
    name = "Create tournament",
    skip(request, pool, claims),
    fields(
        tournament_name = %request.name,
        admin_user = %claims.username
    )
)]
pub async fn create_tournament(
    request: web::Json<CreateTournamentRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let created_by = match claims.user_id() {
        Some(id) => id,
        None => {
            tracing::error!("Invalid user ID in claims: {}", claims.sub);
            return Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Invalid user ID"
            })));
        }
    };

    if request.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Tournament name cannot be empty"
        })));
    }
    if request.end_date < request.start_date {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Tournament cannot end before it starts"
        })));
    }

    let now = Utc::now();
    let tournament = sqlx::query_as::<_, Tournament>(
        r#"
        INSERT INTO tournaments (id, name, description, start_date, end_date, status, created_by, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.name.trim())
    .bind(&request.description)
    .bind(request.start_date)
    .bind(request.end_date)
    .bind(request.status.unwrap_or(TournamentStatus::Pending))
    .bind(created_by)
    .bind(now)
    .bind(now)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!("Failed to create tournament: {}", e);
        actix_web::error::ErrorInternalServerError("Database error")
    })?;

    tracing::info!("Created tournament '{}' with ID: {}", tournament.name, tournament.id);

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "data": tournament
    })))
}

/// List all tournaments, newest first
pub async fn get_all_tournaments(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let tournaments =
        sqlx::query_as::<_, Tournament>("SELECT * FROM tournaments ORDER BY created_at DESC")
            .fetch_all(pool.get_ref())
            .await
            .map_err(|e| {
                tracing::error!("Database error listing tournaments: {}", e);
                actix_web::error::ErrorInternalServerError("Database error")
            })?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": tournaments
    })))
}

pub async fn get_tournament(
    tournament_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let tournament = sqlx::query_as::<_, Tournament>("SELECT * FROM tournaments WHERE id = $1")
        .bind(tournament_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!("Database error getting tournament: {}", e);
            actix_web::error::ErrorInternalServerError("Database error")
        })?;

    match tournament {
        Some(tournament) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": tournament
        }))),
        None => Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "Tournament not found"
        }))),
    }
}

/// Update tournament fields; absent fields keep their stored value
#[tracing::instrument(name = "Update tournament", skip(request, pool))]
pub async fn update_tournament(
    tournament_id: Uuid,
    request: web::Json<UpdateTournamentRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let updated = sqlx::query_as::<_, Tournament>(
        r#"
        UPDATE tournaments
        SET name = COALESCE($2, name),
            description = COALESCE($3, description),
            start_date = COALESCE($4, start_date),
            end_date = COALESCE($5, end_date),
            status = COALESCE($6, status),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(tournament_id)
    .bind(&request.name)
    .bind(&request.description)
    .bind(request.start_date)
    .bind(request.end_date)
    .bind(request.status)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!("Failed to update tournament: {}", e);
        actix_web::error::ErrorInternalServerError("Database error")
    })?;

    match updated {
        Some(tournament) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": tournament
        }))),
        None => Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "Tournament not found"
        }))),
    }
}

#[tracing::instrument(name = "Delete tournament", skip(pool))]
pub async fn delete_tournament(
    tournament_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let result = sqlx::query("DELETE FROM tournaments WHERE id = $1")
        .bind(tournament_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete tournament: {}", e);
            actix_web::error::ErrorInternalServerError("Database error")
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "Tournament not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Tournament deleted"
    })))
}
