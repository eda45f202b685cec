pub mod analytics;
pub mod attendances;
pub mod auth;
pub mod coaches;
pub mod collective_sessions;
pub mod evaluations;
pub mod matches;
pub mod participations;
pub mod players;
pub mod reports;
pub mod sessions;
