//! Axum route handlers for the Progress API.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::Session;
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::progress::ProgressRecord;
use crate::progress::aggregate::{
    increment_level, status_for, summarize, ProgressStatus, ProgressStep, ProgressSummary,
};
use crate::progress::store::{get_progress, insert_progress, list_progress, set_level};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProgressRequest {
    pub skill_name: Option<String>,
    pub current_level: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct IncrementRequest {
    pub step: ProgressStep,
}

#[derive(Debug, Serialize)]
pub struct ProgressItem {
    #[serde(flatten)]
    pub record: ProgressRecord,
    pub status: ProgressStatus,
}

impl From<ProgressRecord> for ProgressItem {
    fn from(record: ProgressRecord) -> Self {
        ProgressItem {
            status: status_for(record.progress_percentage),
            record,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProgressOverview {
    pub records: Vec<ProgressItem>,
    pub summary: ProgressSummary,
}

/// GET /api/v1/progress
pub async fn handle_list_progress(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ProgressOverview>, AppError> {
    let records: Vec<ProgressRecord> = list_progress(&state.db, session.user_id, None)
        .await?
        .into_iter()
        .map(ProgressRecord::from)
        .collect();

    let summary = summarize(&records);
    Ok(Json(ProgressOverview {
        records: records.into_iter().map(ProgressItem::from).collect(),
        summary,
    }))
}

/// POST /api/v1/progress
pub async fn handle_create_progress(
    State(state): State<AppState>,
    session: Session,
    AppJson(request): AppJson<CreateProgressRequest>,
) -> Result<(StatusCode, Json<ProgressItem>), AppError> {
    let skill_name = request
        .skill_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("skill_name is required".to_string()))?;
    let current_level = request
        .current_level
        .ok_or_else(|| AppError::Validation("current_level is required".to_string()))?;

    let row = insert_progress(&state.db, session.user_id, skill_name, current_level)
        .await?
        .ok_or_else(|| AppError::Conflict(format!("'{skill_name}' is already being tracked")))?;
    Ok((StatusCode::CREATED, Json(ProgressRecord::from(row).into())))
}

/// POST /api/v1/progress/:id/increment
pub async fn handle_increment_progress(
    State(state): State<AppState>,
    session: Session,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<IncrementRequest>,
) -> Result<Json<ProgressItem>, AppError> {
    let not_found = || AppError::NotFound(format!("Progress record {id} not found"));

    let existing = get_progress(&state.db, session.user_id, id)
        .await?
        .ok_or_else(not_found)?;
    let level = increment_level(existing.current_level, request.step);

    let row = set_level(&state.db, session.user_id, id, level)
        .await?
        .ok_or_else(not_found)?;

    info!(
        "Progress '{}' for user {} now at {level}",
        row.skill_name, session.user_id
    );
    Ok(Json(ProgressRecord::from(row).into()))
}
