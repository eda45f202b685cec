pub mod aggregation;
pub mod evaluation_scoring;
