//! Dashboard overview: a read-only snapshot combining the profile, recent skill
//! progress and the last week of motivation entries.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::Session;
use crate::errors::AppError;
use crate::models::motivation::MotivationEntry;
use crate::models::profile::Profile;
use crate::models::progress::ProgressRecord;
use crate::motivation::aggregate::{summarize as summarize_motivation, ChartPoint};
use crate::motivation::store::list_entries;
use crate::profile::store::get_profile;
use crate::progress::store::list_progress;
use crate::stats::rounded_mean;
use crate::state::AppState;

const RECENT_PROGRESS: i64 = 5;
const RECENT_MOTIVATION: i64 = 7;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub display_name: String,
    pub career_aspirations: Option<String>,
    pub skill_count: usize,
    pub recent_progress: Vec<ProgressRecord>,
    pub average_progress: i32,
    pub motivation_series: Vec<ChartPoint>,
    pub latest_motivation: Option<i32>,
}

/// `motivation` is expected newest first, as the store returns it.
fn build_dashboard(
    profile: Option<Profile>,
    fallback_name: &str,
    progress: Vec<ProgressRecord>,
    motivation: &[MotivationEntry],
) -> Dashboard {
    let (display_name, career_aspirations, skill_count) = match profile {
        Some(p) => (p.display_name().to_string(), p.career_aspirations.clone(), p.skills.len()),
        None => (fallback_name.to_string(), None, 0),
    };

    Dashboard {
        display_name,
        career_aspirations,
        skill_count,
        average_progress: rounded_mean(progress.iter().map(|r| r.progress_percentage.unwrap_or(0))),
        recent_progress: progress,
        motivation_series: summarize_motivation(motivation, motivation.len()).chart_series,
        latest_motivation: motivation.first().and_then(|e| e.motivation_score),
    }
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Dashboard>, AppError> {
    let profile = get_profile(&state.db, session.user_id)
        .await?
        .map(Profile::from);
    let progress = list_progress(&state.db, session.user_id, Some(RECENT_PROGRESS))
        .await?
        .into_iter()
        .map(ProgressRecord::from)
        .collect();
    let motivation = list_entries(&state.db, session.user_id, RECENT_MOTIVATION).await?;

    Ok(Json(build_dashboard(
        profile,
        session.email.as_deref().unwrap_or_default(),
        progress,
        &motivation,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::ProfileRow;
    use crate::models::progress::ProgressRow;
    use chrono::NaiveDate;
    use serde_json::json;
    use uuid::Uuid;

    fn make_profile(full_name: Option<&str>) -> Profile {
        Profile::from(ProfileRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            full_name: full_name.map(str::to_string),
            email: "grace@example.com".to_string(),
            phone: None,
            location: None,
            bio: None,
            education: None,
            experience: None,
            skills: Some(json!(["Rust", "SQL", "Kubernetes"])),
            career_aspirations: Some("Staff engineer".to_string()),
            avatar_url: None,
            resume_url: None,
            created_at: None,
            updated_at: None,
        })
    }

    fn make_progress(pct: i32) -> ProgressRecord {
        ProgressRecord::from(ProgressRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            skill_name: "Rust".to_string(),
            current_level: Some(pct),
            target_level: Some(100),
            progress_percentage: Some(pct),
            achievements: None,
            completed_courses: None,
            learning_resources: None,
            last_updated: None,
            created_at: None,
        })
    }

    fn make_entry(day: u32, score: i32) -> MotivationEntry {
        MotivationEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 10, day),
            motivation_score: Some(score),
            engagement_score: Some(score),
            heart_rate: None,
            spo2_level: None,
            activity_level: None,
            notes: None,
            wearable_data: None,
            created_at: None,
        }
    }

    #[test]
    fn test_dashboard_from_profile() {
        let motivation = vec![make_entry(16, 75), make_entry(15, 40)];
        let dashboard = build_dashboard(
            Some(make_profile(None)),
            "unused@example.com",
            vec![make_progress(30), make_progress(45)],
            &motivation,
        );
        assert_eq!(dashboard.display_name, "grace@example.com");
        assert_eq!(dashboard.career_aspirations.as_deref(), Some("Staff engineer"));
        assert_eq!(dashboard.skill_count, 3);
        // (30 + 45) / 2 = 37.5
        assert_eq!(dashboard.average_progress, 38);
        assert_eq!(dashboard.latest_motivation, Some(75));
        let labels: Vec<_> = dashboard.motivation_series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Oct 15", "Oct 16"]);
    }

    #[test]
    fn test_dashboard_without_profile_or_history() {
        let dashboard = build_dashboard(None, "new@example.com", Vec::new(), &[]);
        assert_eq!(dashboard.display_name, "new@example.com");
        assert_eq!(dashboard.skill_count, 0);
        assert_eq!(dashboard.average_progress, 0);
        assert_eq!(dashboard.latest_motivation, None);
        assert!(dashboard.motivation_series.is_empty());
    }
}
