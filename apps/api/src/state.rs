use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::analysis::matcher::SkillMatcher;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub config: Config,
    /// Pluggable skill matcher. Default: ContainmentMatcher. Swap via SKILL_MATCH_MODE.
    pub skill_matcher: Arc<dyn SkillMatcher>,
}
