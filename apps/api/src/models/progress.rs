use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{decode_list, TrackedItem};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProgressRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skill_name: String,
    pub current_level: Option<i32>,
    pub target_level: Option<i32>,
    pub progress_percentage: Option<i32>,
    pub achievements: Option<Value>,
    pub completed_courses: Option<Value>,
    pub learning_resources: Option<Value>,
    pub last_updated: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Progress on one skill for one user.
///
/// `current_level` and `progress_percentage` are written together and hold the
/// same value; nothing in the schema enforces that.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressRecord {
    pub id: Uuid,
    pub skill_name: String,
    pub current_level: Option<i32>,
    pub target_level: Option<i32>,
    pub progress_percentage: Option<i32>,
    pub achievements: Vec<TrackedItem>,
    pub completed_courses: Vec<TrackedItem>,
    pub learning_resources: Vec<TrackedItem>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl From<ProgressRow> for ProgressRecord {
    fn from(row: ProgressRow) -> Self {
        ProgressRecord {
            achievements: decode_list("progress_tracking.achievements", row.achievements.as_ref()),
            completed_courses: decode_list(
                "progress_tracking.completed_courses",
                row.completed_courses.as_ref(),
            ),
            learning_resources: decode_list(
                "progress_tracking.learning_resources",
                row.learning_resources.as_ref(),
            ),
            id: row.id,
            skill_name: row.skill_name,
            current_level: row.current_level,
            target_level: row.target_level,
            progress_percentage: row.progress_percentage,
            last_updated: row.last_updated,
        }
    }
}
