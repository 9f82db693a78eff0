use actix_web::web;

pub mod admin;
pub mod auth;
pub mod backend_health;
pub mod matches;
pub mod profile;
pub mod registration;
pub mod teams;
pub mod tournaments;

use crate::middleware::admin::AdminMiddleware;
use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(registration::register)
        .service(backend_health::backend_health)
        .service(auth::login);

    // Profile routes (require authentication)
    cfg.service(
        web::scope("/profile")
            .wrap(AuthMiddleware)
            .service(profile::get_own_profile),
    );
    // Tournament reads (require authentication)
    cfg.service(
        web::scope("/tournaments")
            .wrap(AuthMiddleware)
            .service(tournaments::get_all_tournaments)
            .service(tournaments::get_tournament)
            .service(tournaments::get_tournament_teams)
            .service(tournaments::get_tournament_matches)
            .service(tournaments::get_tournament_standings),
    );
    // Team management (require authentication)
    cfg.service(
        web::scope("/teams")
            .wrap(AuthMiddleware)
            .service(teams::create_team)
            .service(teams::get_team)
            .service(teams::update_team)
            .service(teams::delete_team),
    );
    // Match reads (require authentication)
    cfg.service(
        web::scope("/matches")
            .wrap(AuthMiddleware)
            .service(matches::get_match),
    );
    // Administrative mutations (require admin role)
    cfg.service(
        web::scope("/admin")
            .wrap(AdminMiddleware)
            .service(admin::create_tournament)
            .service(admin::update_tournament)
            .service(admin::delete_tournament)
            .service(admin::create_match)
            .service(admin::update_match)
            .service(admin::delete_match)
            .service(admin::recompute_standings),
    );
}
