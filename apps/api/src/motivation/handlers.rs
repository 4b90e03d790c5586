use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::Session;
use crate::errors::AppError;
use crate::extract::{AppJson, AppQuery};
use crate::models::motivation::MotivationEntry;
use crate::motivation::aggregate::{level_for, summarize, today_entry, MotivationLevel, MotivationSummary};
use crate::motivation::store::{insert_entry, list_entries, NewMotivationEntry};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MotivationQuery {
    pub window: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MotivationOverview {
    pub entries: Vec<MotivationEntry>,
    pub summary: MotivationSummary,
    pub today: Option<MotivationEntry>,
    pub motivation_level: MotivationLevel,
    pub engagement_level: MotivationLevel,
}

#[derive(Debug, Deserialize)]
pub struct LogMotivationRequest {
    pub motivation_score: Option<i32>,
    pub engagement_score: Option<i32>,
    pub heart_rate: Option<i32>,
    pub spo2_level: Option<i32>,
    pub activity_level: Option<i32>,
    pub notes: Option<String>,
    pub wearable_data: Option<Value>,
}

impl LogMotivationRequest {
    /// Both scores are required; blank notes are stored as null.
    fn into_entry(self, date: chrono::NaiveDate) -> Result<NewMotivationEntry, AppError> {
        let (Some(motivation_score), Some(engagement_score)) =
            (self.motivation_score, self.engagement_score)
        else {
            return Err(AppError::Validation(
                "motivation_score and engagement_score are required".to_string(),
            ));
        };

        Ok(NewMotivationEntry {
            date,
            motivation_score,
            engagement_score,
            heart_rate: self.heart_rate,
            spo2_level: self.spo2_level,
            activity_level: self.activity_level,
            notes: self
                .notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            wearable_data: self.wearable_data,
        })
    }
}

/// GET /api/v1/motivation?window=
pub async fn handle_get_motivation(
    State(state): State<AppState>,
    session: Session,
    AppQuery(query): AppQuery<MotivationQuery>,
) -> Result<Json<MotivationOverview>, AppError> {
    let entries = list_entries(
        &state.db,
        session.user_id,
        state.config.motivation_history_limit,
    )
    .await?;

    let window = query.window.unwrap_or(state.config.motivation_chart_window);
    let summary = summarize(&entries, window);
    let today = today_entry(&entries, Utc::now().date_naive()).cloned();

    Ok(Json(MotivationOverview {
        motivation_level: level_for(summary.average_motivation),
        engagement_level: level_for(summary.average_engagement),
        today,
        summary,
        entries,
    }))
}

/// POST /api/v1/motivation
pub async fn handle_log_motivation(
    State(state): State<AppState>,
    session: Session,
    AppJson(request): AppJson<LogMotivationRequest>,
) -> Result<(StatusCode, Json<MotivationEntry>), AppError> {
    let entry = request.into_entry(Utc::now().date_naive())?;
    let row = insert_entry(&state.db, session.user_id, &entry).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 16).unwrap()
    }

    #[test]
    fn test_missing_score_is_rejected() {
        let request: LogMotivationRequest =
            serde_json::from_value(json!({"motivation_score": 70})).unwrap();
        assert!(matches!(
            request.into_entry(today()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_blank_notes_become_none() {
        let request: LogMotivationRequest = serde_json::from_value(json!({
            "motivation_score": 70,
            "engagement_score": 65,
            "heart_rate": 72,
            "notes": "   "
        }))
        .unwrap();
        let entry = request.into_entry(today()).unwrap();
        assert_eq!(entry.notes, None);
        assert_eq!(entry.heart_rate, Some(72));
        assert_eq!(entry.date, today());
    }

    #[test]
    fn test_notes_are_trimmed() {
        let request: LogMotivationRequest = serde_json::from_value(json!({
            "motivation_score": 10,
            "engagement_score": 20,
            "notes": "  slept badly "
        }))
        .unwrap();
        let entry = request.into_entry(today()).unwrap();
        assert_eq!(entry.notes.as_deref(), Some("slept badly"));
    }
}
