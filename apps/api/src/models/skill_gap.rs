use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillGapRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target_job_role_id: Option<Uuid>,
    pub current_skills: Option<Value>,
    pub missing_skills: Option<Value>,
    pub skill_gaps: Option<Value>,
    pub recommendations: Option<Value>,
    pub match_percentage: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
