// Skill progress tracking: records, increments, summary statistics.

pub mod aggregate;
pub mod handlers;
pub mod store;
