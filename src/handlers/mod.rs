pub mod auth_handler;
pub mod backend_health_handler;
pub mod match_handler;
pub mod profile_handler;
pub mod registration_handler;
pub mod standings_handler;
pub mod team_handler;
pub mod tournament_handler;
