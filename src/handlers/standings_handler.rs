use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::settings::StandingsSettings;
use crate::middleware::auth::Claims;
use crate::standings::StandingsEngine;

/// Read the persisted classification table for a tournament
#[tracing::instrument(name = "Get standings", skip(pool, standings_settings))]
pub async fn get_standings(
    tournament_id: Uuid,
    pool: web::Data<PgPool>,
    standings_settings: web::Data<StandingsSettings>,
) -> Result<HttpResponse> {
    let engine = StandingsEngine::with_policy(
        pool.get_ref().clone(),
        standings_settings.missing_score_policy,
    );

    match engine.fetch(tournament_id).await {
        Ok(rows) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": rows
        }))),
        Err(e) => {
            tracing::error!("Failed to fetch standings: {}", e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to fetch standings"
            })))
        }
    }
}

/// Rebuild the classification table from completed matches, then return it
#[tracing::instrument(
    name = "Recompute standings request",
    skip(pool, standings_settings, claims),
    fields(admin_user = %claims.username)
)]
pub async fn recompute_standings(
    tournament_id: Uuid,
    pool: web::Data<PgPool>,
    standings_settings: web::Data<StandingsSettings>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let engine = StandingsEngine::with_policy(
        pool.get_ref().clone(),
        standings_settings.missing_score_policy,
    );

    if let Err(e) = engine.recompute(tournament_id).await {
        tracing::error!("Failed to recompute standings: {}", e);
        return Ok(HttpResponse::InternalServerError().json(json!({
            "success": false,
            "message": "Failed to recompute standings"
        })));
    }

    match engine.fetch(tournament_id).await {
        Ok(rows) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": rows
        }))),
        Err(e) => {
            tracing::error!("Failed to fetch standings after recompute: {}", e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to fetch standings"
            })))
        }
    }
}
