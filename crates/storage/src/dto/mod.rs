pub mod attendance;
pub mod coach;
pub mod collective_session;
pub mod common;
pub mod evaluation;
pub mod matches;
pub mod participation;
pub mod player;
pub mod report;
pub mod session;
