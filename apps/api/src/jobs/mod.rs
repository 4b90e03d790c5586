// Job roles (read-only) and per-user job recommendations.

pub mod handlers;
pub mod recommend;
pub mod store;
