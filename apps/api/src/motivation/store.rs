use chrono::NaiveDate;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::motivation::MotivationEntry;

/// Fields of a new log entry. Scores are validated by the caller.
#[derive(Debug, Clone)]
pub struct NewMotivationEntry {
    pub date: NaiveDate,
    pub motivation_score: i32,
    pub engagement_score: i32,
    pub heart_rate: Option<i32>,
    pub spo2_level: Option<i32>,
    pub activity_level: Option<i32>,
    pub notes: Option<String>,
    pub wearable_data: Option<Value>,
}

/// Newest entries first, at most `limit`.
pub async fn list_entries(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<MotivationEntry>, sqlx::Error> {
    sqlx::query_as::<_, MotivationEntry>(
        r#"
        SELECT * FROM motivation_tracking
        WHERE user_id = $1
        ORDER BY date DESC NULLS LAST, created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Appends one entry. The log has no update or delete path.
pub async fn insert_entry(
    pool: &PgPool,
    user_id: Uuid,
    entry: &NewMotivationEntry,
) -> Result<MotivationEntry, sqlx::Error> {
    let row = sqlx::query_as::<_, MotivationEntry>(
        r#"
        INSERT INTO motivation_tracking
            (user_id, date, motivation_score, engagement_score,
             heart_rate, spo2_level, activity_level, notes, wearable_data)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(entry.date)
    .bind(entry.motivation_score)
    .bind(entry.engagement_score)
    .bind(entry.heart_rate)
    .bind(entry.spo2_level)
    .bind(entry.activity_level)
    .bind(entry.notes.as_deref())
    .bind(entry.wearable_data.as_ref())
    .fetch_one(pool)
    .await?;

    info!("Logged motivation for user {user_id} on {}", entry.date);
    Ok(row)
}
