// src/routes/teams.rs
use actix_web::{delete, get, post, put, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::team_handler;
use crate::middleware::auth::Claims;
use crate::models::team::{CreateTeamRequest, UpdateTeamRequest};

/// Register a new team
#[post("")]
async fn create_team(
    request: web::Json<CreateTeamRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    team_handler::create_team(request, pool, claims).await
}

/// Get a team by ID
#[get("/{team_id}")]
async fn get_team(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let team_id = path.into_inner();
    team_handler::get_team(team_id, pool).await
}

/// Rename a team
#[put("/{team_id}")]
async fn update_team(
    path: web::Path<Uuid>,
    request: web::Json<UpdateTeamRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let team_id = path.into_inner();
    team_handler::update_team(team_id, request, pool).await
}

/// Remove a team
#[delete("/{team_id}")]
async fn delete_team(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let team_id = path.into_inner();
    team_handler::delete_team(team_id, pool).await
}
