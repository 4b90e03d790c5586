// Profile: fetch-or-create, edits, skill list, avatar and résumé uploads.

pub mod handlers;
pub mod skills;
pub mod store;
