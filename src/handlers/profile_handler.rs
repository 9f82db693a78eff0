use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;

use crate::middleware::auth::Claims;
use crate::models::user::UserProfile;

/// Return the signed-in user's own record.
pub async fn get_own_profile(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => {
            tracing::error!("Invalid user ID in claims: {}", claims.sub);
            return Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Invalid user ID"
            })));
        }
    };

    let profile = sqlx::query_as::<_, UserProfile>(
        "SELECT id, username, email, full_name, phone, role, created_at FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!("Database error loading profile: {}", e);
        actix_web::error::ErrorInternalServerError("Database error")
    })?;

    match profile {
        Some(profile) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": profile
        }))),
        None => Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "User not found"
        }))),
    }
}
