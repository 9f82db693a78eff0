// src/routes/admin.rs
//
// Administrative mutations: tournament and match management plus manual
// standings recomputes. The whole scope sits behind AdminMiddleware.
use actix_web::{delete, post, put, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::settings::StandingsSettings;
use crate::handlers::{match_handler, standings_handler, tournament_handler};
use crate::middleware::auth::Claims;
use crate::models::matches::{CreateMatchRequest, UpdateMatchRequest};
use crate::models::tournament::{CreateTournamentRequest, UpdateTournamentRequest};

/// Create a tournament
#[post("/tournaments")]
async fn create_tournament(
    request: web::Json<CreateTournamentRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    tournament_handler::create_tournament(request, pool, claims).await
}

/// Update a tournament
#[put("/tournaments/{tournament_id}")]
async fn update_tournament(
    path: web::Path<Uuid>,
    request: web::Json<UpdateTournamentRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    tournament_handler::update_tournament(tournament_id, request, pool).await
}

/// Delete a tournament
#[delete("/tournaments/{tournament_id}")]
async fn delete_tournament(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    tournament_handler::delete_tournament(tournament_id, pool).await
}

/// Schedule a match
#[post("/matches")]
async fn create_match(
    request: web::Json<CreateMatchRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    match_handler::create_match(request, pool, claims).await
}

/// Update a match (including recording its result)
#[put("/matches/{match_id}")]
async fn update_match(
    path: web::Path<Uuid>,
    request: web::Json<UpdateMatchRequest>,
    pool: web::Data<PgPool>,
    standings_settings: web::Data<StandingsSettings>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    match_handler::update_match(match_id, request, pool, standings_settings).await
}

/// Delete a match
#[delete("/matches/{match_id}")]
async fn delete_match(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    match_handler::delete_match(match_id, pool).await
}

/// Rebuild a tournament's classification table
#[post("/tournaments/{tournament_id}/standings/recompute")]
async fn recompute_standings(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    standings_settings: web::Data<StandingsSettings>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    standings_handler::recompute_standings(tournament_id, pool, standings_settings, claims).await
}
