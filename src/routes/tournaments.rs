// src/routes/tournaments.rs
use actix_web::{get, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::settings::StandingsSettings;
use crate::handlers::{match_handler, standings_handler, team_handler, tournament_handler};

/// List all tournaments
#[get("")]
async fn get_all_tournaments(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    tournament_handler::get_all_tournaments(pool).await
}

/// Get a tournament by ID
#[get("/{tournament_id}")]
async fn get_tournament(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    tournament_handler::get_tournament(tournament_id, pool).await
}

/// List a tournament's teams
#[get("/{tournament_id}/teams")]
async fn get_tournament_teams(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    team_handler::get_teams_by_tournament(tournament_id, pool).await
}

/// List a tournament's matches
#[get("/{tournament_id}/matches")]
async fn get_tournament_matches(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    match_handler::get_matches_by_tournament(tournament_id, pool).await
}

/// Get a tournament's classification table
#[get("/{tournament_id}/standings")]
async fn get_tournament_standings(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    standings_settings: web::Data<StandingsSettings>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    standings_handler::get_standings(tournament_id, pool, standings_settings).await
}
