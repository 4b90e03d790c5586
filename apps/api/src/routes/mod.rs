pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::auth::session;
use crate::dashboard;
use crate::jobs::handlers as jobs;
use crate::motivation::handlers as motivation;
use crate::profile::handlers as profile;
use crate::progress::handlers as progress;
use crate::state::AppState;

/// Upper bound for avatar and résumé uploads.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/session", get(session::handle_current_session))
        .route("/api/v1/dashboard", get(dashboard::handle_dashboard))
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).put(profile::handle_update_profile),
        )
        .route("/api/v1/profile/skills", post(profile::handle_add_skill))
        .route(
            "/api/v1/profile/skills/:skill",
            delete(profile::handle_remove_skill),
        )
        .route(
            "/api/v1/profile/avatar",
            post(profile::handle_upload_avatar).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/api/v1/profile/resume",
            post(profile::handle_upload_resume).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Skills catalog and gap analysis
        .route("/api/v1/skills/catalog", get(analysis::handle_skill_catalog))
        .route(
            "/api/v1/skills/gap-analysis",
            post(analysis::handle_gap_analysis),
        )
        .route(
            "/api/v1/skills/gap-analysis/:job_role_id",
            get(analysis::handle_get_gap_analysis),
        )
        // Job roles and recommendations
        .route("/api/v1/jobs", get(jobs::handle_list_jobs))
        .route(
            "/api/v1/jobs/recommendations",
            get(jobs::handle_list_recommendations),
        )
        .route(
            "/api/v1/jobs/recommendations/refresh",
            post(jobs::handle_refresh_recommendations),
        )
        .route(
            "/api/v1/jobs/recommendations/:job_role_id",
            patch(jobs::handle_update_recommendation),
        )
        .route("/api/v1/jobs/:id", get(jobs::handle_get_job))
        // Progress
        .route(
            "/api/v1/progress",
            get(progress::handle_list_progress).post(progress::handle_create_progress),
        )
        .route(
            "/api/v1/progress/:id/increment",
            post(progress::handle_increment_progress),
        )
        // Motivation
        .route(
            "/api/v1/motivation",
            get(motivation::handle_get_motivation).post(motivation::handle_log_motivation),
        )
        .with_state(state)
}
