// src/routes/matches.rs
use actix_web::{get, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::match_handler;

/// Get a match by ID
#[get("/{match_id}")]
async fn get_match(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    match_handler::get_match(match_id, pool).await
}
