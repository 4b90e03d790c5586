//! Axum route handlers for the Profile API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::store::list_catalog_skills;
use crate::auth::Session;
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::profile::Profile;
use crate::profile::skills::{
    add_skill, normalize_skills, remove_skill, resume_text_or_empty, suggest_skills,
};
use crate::profile::store::{
    fetch_or_create_profile, set_document_url, set_skills, update_profile, DocumentKind,
    ProfileChanges,
};
use crate::state::AppState;
use crate::storage::{object_key, public_url, put_object};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub career_aspirations: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddSkillRequest {
    pub skill: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub profile: Profile,
    /// Catalog skills found in an uploaded résumé that the profile lacks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_skills: Option<Vec<String>>,
}

struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    bytes: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/profile
///
/// Creates the profile on first access.
pub async fn handle_get_profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Profile>, AppError> {
    let row = fetch_or_create_profile(&state.db, session.user_id, session_email(&session)).await?;
    Ok(Json(row.into()))
}

/// PUT /api/v1/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    session: Session,
    AppJson(request): AppJson<UpdateProfileRequest>,
) -> Result<Json<Profile>, AppError> {
    fetch_or_create_profile(&state.db, session.user_id, session_email(&session)).await?;

    let skills = normalize_skills(&request.skills);
    let changes = ProfileChanges {
        full_name: request.full_name.as_deref(),
        phone: request.phone.as_deref(),
        location: request.location.as_deref(),
        bio: request.bio.as_deref(),
        skills: &skills,
        career_aspirations: request.career_aspirations.as_deref(),
    };
    let row = update_profile(&state.db, session.user_id, &changes).await?;

    info!("Updated profile for user {}", session.user_id);
    Ok(Json(row.into()))
}

/// POST /api/v1/profile/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    session: Session,
    AppJson(request): AppJson<AddSkillRequest>,
) -> Result<Json<Profile>, AppError> {
    let profile: Profile =
        fetch_or_create_profile(&state.db, session.user_id, session_email(&session))
            .await?
            .into();

    match add_skill(&profile.skills, &request.skill)? {
        Some(skills) => {
            let row = set_skills(&state.db, session.user_id, &skills).await?;
            Ok(Json(row.into()))
        }
        None => Ok(Json(profile)),
    }
}

/// DELETE /api/v1/profile/skills/:skill
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    session: Session,
    AppPath(skill): AppPath<String>,
) -> Result<Json<Profile>, AppError> {
    let profile: Profile =
        fetch_or_create_profile(&state.db, session.user_id, session_email(&session))
            .await?
            .into();

    let skills = remove_skill(&profile.skills, &skill);
    if skills.len() == profile.skills.len() {
        return Ok(Json(profile));
    }
    let row = set_skills(&state.db, session.user_id, &skills).await?;
    Ok(Json(row.into()))
}

/// POST /api/v1/profile/avatar (multipart, field `file`)
pub async fn handle_upload_avatar(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let file = read_file_field(multipart).await?;
    let (url, profile) = store_document(&state, &session, DocumentKind::Avatar, &file).await?;
    Ok(Json(UploadResponse {
        url,
        profile,
        suggested_skills: None,
    }))
}

/// POST /api/v1/profile/resume (multipart, field `file`)
///
/// Stores the résumé and suggests catalog skills mentioned in it. Once the
/// document is stored, suggestion failures only shrink the suggestion list.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let file = read_file_field(multipart).await?;
    let (url, profile) = store_document(&state, &session, DocumentKind::Resume, &file).await?;

    let text = resume_text_or_empty(
        file.bytes.clone(),
        file.content_type.clone(),
        file.file_name.clone(),
    )
    .await;

    let catalog: Vec<String> = match list_catalog_skills(&state.db, None).await {
        Ok(rows) => rows.into_iter().map(|s| s.name).collect(),
        Err(e) => {
            warn!("Skills catalog unavailable for résumé suggestions: {e}");
            Vec::new()
        }
    };
    let suggested = suggest_skills(&text, &catalog, &profile.skills);

    Ok(Json(UploadResponse {
        url,
        profile,
        suggested_skills: Some(suggested),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn session_email(session: &Session) -> &str {
    session.email.as_deref().unwrap_or_default()
}

async fn read_file_field(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(String::from);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("could not read upload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::Validation("uploaded file is empty".to_string()));
        }
        return Ok(UploadedFile {
            file_name,
            content_type,
            bytes,
        });
    }
    Err(AppError::Validation("multipart field 'file' is required".to_string()))
}

async fn store_document(
    state: &AppState,
    session: &Session,
    kind: DocumentKind,
    file: &UploadedFile,
) -> Result<(String, Profile), AppError> {
    fetch_or_create_profile(&state.db, session.user_id, session_email(session)).await?;

    let bucket = match kind {
        DocumentKind::Avatar => &state.config.avatar_bucket,
        DocumentKind::Resume => &state.config.resume_bucket,
    };
    let key = object_key(session.user_id, &file.file_name, Utc::now().timestamp_millis());

    put_object(
        &state.s3,
        bucket,
        &key,
        file.bytes.clone(),
        file.content_type.as_deref(),
    )
    .await?;

    let url = public_url(&state.config, bucket, &key);
    let row = set_document_url(&state.db, session.user_id, kind, &url).await?;
    info!("Stored {} for user {}", kind.as_str(), session.user_id);

    Ok((url, row.into()))
}
