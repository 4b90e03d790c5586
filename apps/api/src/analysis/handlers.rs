//! Axum route handlers for the Skills API.

use axum::{
    extract::State,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::analysis::gap::{analyze_skill_gap, SkillGapAnalysis, SkillGapRecord};
use crate::analysis::store::{get_skill_gap, list_catalog_skills};
use crate::auth::Session;
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::models::job::CatalogSkillRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GapAnalysisRequest {
    pub job_role_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
}

/// POST /api/v1/skills/gap-analysis
pub async fn handle_gap_analysis(
    State(state): State<AppState>,
    session: Session,
    AppJson(request): AppJson<GapAnalysisRequest>,
) -> Result<Json<SkillGapAnalysis>, AppError> {
    let job_role_id = request
        .job_role_id
        .ok_or_else(|| AppError::Validation("job_role_id is required".to_string()))?;

    let analysis = analyze_skill_gap(
        &state.db,
        state.skill_matcher.as_ref(),
        session.user_id,
        job_role_id,
    )
    .await?;

    Ok(Json(analysis))
}

/// GET /api/v1/skills/gap-analysis/:job_role_id
pub async fn handle_get_gap_analysis(
    State(state): State<AppState>,
    session: Session,
    AppPath(job_role_id): AppPath<Uuid>,
) -> Result<Json<SkillGapRecord>, AppError> {
    let row = get_skill_gap(&state.db, session.user_id, job_role_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No skill gap analysis for job role {job_role_id}"))
        })?;
    Ok(Json(row.into()))
}

/// GET /api/v1/skills/catalog
pub async fn handle_skill_catalog(
    State(state): State<AppState>,
    _session: Session,
    AppQuery(query): AppQuery<CatalogQuery>,
) -> Result<Json<Vec<CatalogSkillRow>>, AppError> {
    let category = query.category.as_deref().filter(|c| !c.trim().is_empty());
    Ok(Json(list_catalog_skills(&state.db, category).await?))
}
