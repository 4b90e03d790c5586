//! Axum route handlers for the Jobs API.

use std::collections::HashMap;

use axum::{
    extract::State,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::Session;
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::jobs::recommend::rank_roles;
use crate::jobs::store::{
    get_job_role, get_job_roles_by_ids, list_active_job_roles, list_recommendations,
    update_recommendation_flags, upsert_recommendation,
};
use crate::models::job::{JobRecommendation, JobRecommendationRow, JobRole};
use crate::models::profile::Profile;
use crate::profile::store::get_profile;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RecommendedJob {
    pub job_role: Option<JobRole>,
    pub recommendation: JobRecommendation,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationFlags {
    pub is_bookmarked: Option<bool>,
    pub is_applied: Option<bool>,
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    _session: Session,
) -> Result<Json<Vec<JobRole>>, AppError> {
    let roles = list_active_job_roles(&state.db, state.config.job_role_limit).await?;
    Ok(Json(roles.into_iter().map(JobRole::from).collect()))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    _session: Session,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<JobRole>, AppError> {
    let role = get_job_role(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job role {id} not found")))?;
    Ok(Json(role.into()))
}

/// POST /api/v1/jobs/recommendations/refresh
///
/// Re-scores every active role against the current profile skills.
pub async fn handle_refresh_recommendations(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<RecommendedJob>>, AppError> {
    let skills = get_profile(&state.db, session.user_id)
        .await?
        .map(|row| Profile::from(row).skills)
        .unwrap_or_default();

    let roles: Vec<JobRole> = list_active_job_roles(&state.db, state.config.job_role_limit)
        .await?
        .into_iter()
        .map(JobRole::from)
        .collect();

    let scores = rank_roles(state.skill_matcher.as_ref(), &skills, &roles);
    let mut by_id: HashMap<Uuid, JobRole> = roles.into_iter().map(|r| (r.id, r)).collect();

    let mut recommended = Vec::with_capacity(scores.len());
    for score in &scores {
        let row = upsert_recommendation(&state.db, session.user_id, score).await?;
        recommended.push(RecommendedJob {
            job_role: by_id.remove(&score.job_role_id),
            recommendation: row.into(),
        });
    }

    info!(
        "Refreshed {} job recommendations for user {}",
        recommended.len(),
        session.user_id
    );
    Ok(Json(recommended))
}

/// GET /api/v1/jobs/recommendations
pub async fn handle_list_recommendations(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<RecommendedJob>>, AppError> {
    let rows = list_recommendations(&state.db, session.user_id).await?;
    Ok(Json(attach_roles(&state, rows).await?))
}

/// PATCH /api/v1/jobs/recommendations/:job_role_id
pub async fn handle_update_recommendation(
    State(state): State<AppState>,
    session: Session,
    AppPath(job_role_id): AppPath<Uuid>,
    AppJson(flags): AppJson<RecommendationFlags>,
) -> Result<Json<JobRecommendation>, AppError> {
    if flags.is_bookmarked.is_none() && flags.is_applied.is_none() {
        return Err(AppError::Validation(
            "one of is_bookmarked or is_applied is required".to_string(),
        ));
    }

    let row = update_recommendation_flags(
        &state.db,
        session.user_id,
        job_role_id,
        flags.is_bookmarked,
        flags.is_applied,
    )
    .await?
    .ok_or_else(|| {
        AppError::NotFound(format!("No recommendation for job role {job_role_id}"))
    })?;
    Ok(Json(row.into()))
}

async fn attach_roles(
    state: &AppState,
    rows: Vec<JobRecommendationRow>,
) -> Result<Vec<RecommendedJob>, AppError> {
    let ids: Vec<Uuid> = rows.iter().filter_map(|r| r.job_role_id).collect();
    let roles: HashMap<Uuid, JobRole> = get_job_roles_by_ids(&state.db, &ids)
        .await?
        .into_iter()
        .map(|row| (row.id, JobRole::from(row)))
        .collect();

    Ok(rows
        .into_iter()
        .map(|row| RecommendedJob {
            job_role: row.job_role_id.and_then(|id| roles.get(&id).cloned()),
            recommendation: row.into(),
        })
        .collect())
}
