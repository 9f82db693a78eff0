pub mod engine;
pub mod table;

pub use engine::{DataAccessError, StandingsEngine};
pub use table::{aggregate_standings, MissingScorePolicy, FALLBACK_TEAM_NAME};
