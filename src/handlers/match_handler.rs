use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::settings::StandingsSettings;
use crate::middleware::auth::Claims;
use crate::models::matches::{CreateMatchRequest, Match, MatchStatus, UpdateMatchRequest};
use crate::standings::StandingsEngine;

/// Schedule a new match between two teams of a tournament
#[tracing::instrument(
    name = "Create match",
    skip(request, pool, claims),
    fields(
        tournament_id = %request.tournament_id,
        admin_user = %claims.username
    )
)]
pub async fn create_match(
    request: web::Json<CreateMatchRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    if let Err(validation_error) = request.validate() {
        tracing::warn!("Match creation validation failed: {}", validation_error);
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": validation_error
        })));
    }

    // Both sides must be teams of the target tournament
    let team_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM teams WHERE tournament_id = $1 AND id IN ($2, $3)",
    )
    .bind(request.tournament_id)
    .bind(request.home_team_id)
    .bind(request.away_team_id)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!("Database error checking match teams: {}", e);
        actix_web::error::ErrorInternalServerError("Database error")
    })?;

    if team_count != 2 {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Both teams must belong to the tournament"
        })));
    }

    let now = Utc::now();
    let inserted = sqlx::query_as::<_, Match>(
        r#"
        INSERT INTO matches (id, tournament_id, home_team_id, away_team_id, home_score, away_score,
                             status, match_date, round, venue, created_at, updated_at)
        VALUES ($1, $2, $3, $4, NULL, NULL, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.tournament_id)
    .bind(request.home_team_id)
    .bind(request.away_team_id)
    .bind(MatchStatus::Scheduled)
    .bind(request.match_date)
    .bind(&request.round)
    .bind(&request.venue)
    .bind(now)
    .bind(now)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!("Failed to create match: {}", e);
        actix_web::error::ErrorInternalServerError("Database error")
    })?;

    tracing::info!("Created match {} in tournament {}", inserted.id, inserted.tournament_id);

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "data": inserted
    })))
}

pub async fn get_match(match_id: Uuid, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let game = sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE id = $1")
        .bind(match_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!("Database error getting match: {}", e);
            actix_web::error::ErrorInternalServerError("Database error")
        })?;

    match game {
        Some(game) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": game
        }))),
        None => Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "Match not found"
        }))),
    }
}

/// List a tournament's matches in calendar order
pub async fn get_matches_by_tournament(
    tournament_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let matches = sqlx::query_as::<_, Match>(
        "SELECT * FROM matches WHERE tournament_id = $1 ORDER BY match_date ASC",
    )
    .bind(tournament_id)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!("Database error listing matches: {}", e);
        actix_web::error::ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": matches
    })))
}

/// Update a match. Completing a match (recording its result) triggers a
/// standings recompute for its tournament.
#[tracing::instrument(name = "Update match", skip(request, pool, standings_settings))]
pub async fn update_match(
    match_id: Uuid,
    request: web::Json<UpdateMatchRequest>,
    pool: web::Data<PgPool>,
    standings_settings: web::Data<StandingsSettings>,
) -> Result<HttpResponse> {
    let updated = sqlx::query_as::<_, Match>(
        r#"
        UPDATE matches
        SET home_score = COALESCE($2, home_score),
            away_score = COALESCE($3, away_score),
            status = COALESCE($4, status),
            match_date = COALESCE($5, match_date),
            round = COALESCE($6, round),
            venue = COALESCE($7, venue),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(match_id)
    .bind(request.home_score)
    .bind(request.away_score)
    .bind(request.status)
    .bind(request.match_date)
    .bind(&request.round)
    .bind(&request.venue)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!("Failed to update match: {}", e);
        actix_web::error::ErrorInternalServerError("Database error")
    })?;

    let game = match updated {
        Some(game) => game,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "success": false,
                "message": "Match not found"
            })));
        }
    };

    // A completed result changes the classification table
    if game.status == MatchStatus::Completed {
        let engine = StandingsEngine::with_policy(
            pool.get_ref().clone(),
            standings_settings.missing_score_policy,
        );
        if let Err(e) = engine.recompute(game.tournament_id).await {
            tracing::error!(
                "Failed to recompute standings for tournament {}: {}",
                game.tournament_id,
                e
            );
            return Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Match updated but standings recompute failed"
            })));
        }
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": game
    })))
}

#[tracing::instrument(name = "Delete match", skip(pool))]
pub async fn delete_match(match_id: Uuid, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let result = sqlx::query("DELETE FROM matches WHERE id = $1")
        .bind(match_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete match: {}", e);
            actix_web::error::ErrorInternalServerError("Database error")
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "Match not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Match deleted"
    })))
}
