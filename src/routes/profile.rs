use actix_web::{get, web, HttpResponse, Result};
use sqlx::PgPool;

use crate::handlers::profile_handler;
use crate::middleware::auth::Claims;

#[get("/me")]
async fn get_own_profile(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    profile_handler::get_own_profile(pool, claims).await
}
