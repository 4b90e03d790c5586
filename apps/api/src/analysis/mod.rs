// Skill gap analysis: matcher backends, snapshot persistence, catalog lookup.

pub mod gap;
pub mod handlers;
pub mod matcher;
pub mod store;
