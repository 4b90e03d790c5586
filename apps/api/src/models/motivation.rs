use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One daily motivation log. Rows are only ever inserted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MotivationEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: Option<NaiveDate>,
    pub motivation_score: Option<i32>,
    pub engagement_score: Option<i32>,
    pub heart_rate: Option<i32>,
    pub spo2_level: Option<i32>,
    pub activity_level: Option<i32>,
    pub notes: Option<String>,
    pub wearable_data: Option<Value>,
    pub created_at: Option<DateTime<Utc>>,
}
