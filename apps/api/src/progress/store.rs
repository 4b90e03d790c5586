use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::progress::ProgressRow;

/// The user's records, most recently updated first.
pub async fn list_progress(
    pool: &PgPool,
    user_id: Uuid,
    limit: Option<i64>,
) -> Result<Vec<ProgressRow>, sqlx::Error> {
    sqlx::query_as::<_, ProgressRow>(
        r#"
        SELECT * FROM progress_tracking
        WHERE user_id = $1
        ORDER BY last_updated DESC NULLS LAST
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Starts tracking a skill: target 100, progress equal to the starting level,
/// no achievements or courses yet. Returns `None` when the user already tracks
/// a skill with this name (one record per user and skill).
pub async fn insert_progress(
    pool: &PgPool,
    user_id: Uuid,
    skill_name: &str,
    current_level: i32,
) -> Result<Option<ProgressRow>, sqlx::Error> {
    let row = sqlx::query_as::<_, ProgressRow>(
        r#"
        INSERT INTO progress_tracking
            (user_id, skill_name, current_level, target_level, progress_percentage,
             achievements, completed_courses, last_updated)
        VALUES ($1, $2, $3, 100, $3, '[]'::jsonb, '[]'::jsonb, now())
        ON CONFLICT (user_id, skill_name) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(skill_name)
    .bind(current_level)
    .fetch_optional(pool)
    .await?;

    if row.is_some() {
        info!("Started tracking '{skill_name}' for user {user_id} at {current_level}");
    }
    Ok(row)
}

pub async fn get_progress(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<ProgressRow>, sqlx::Error> {
    sqlx::query_as::<_, ProgressRow>(
        "SELECT * FROM progress_tracking WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Writes `level` to both `current_level` and `progress_percentage`.
pub async fn set_level(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    level: i32,
) -> Result<Option<ProgressRow>, sqlx::Error> {
    sqlx::query_as::<_, ProgressRow>(
        r#"
        UPDATE progress_tracking
        SET current_level = $3,
            progress_percentage = $3,
            last_updated = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(level)
    .fetch_optional(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    async fn test_insert_starts_at_level(pool: PgPool) {
        let user_id = Uuid::new_v4();
        let row = insert_progress(&pool, user_id, "Rust", 30)
            .await
            .unwrap()
            .expect("new skill is inserted");

        assert_eq!(row.current_level, Some(30));
        assert_eq!(row.progress_percentage, Some(30));
        assert_eq!(row.target_level, Some(100));
        assert_eq!(row.achievements, Some(serde_json::json!([])));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_second_record_for_same_skill_is_refused(pool: PgPool) {
        let user_id = Uuid::new_v4();
        assert!(insert_progress(&pool, user_id, "Rust", 30).await.unwrap().is_some());
        assert!(insert_progress(&pool, user_id, "Rust", 70).await.unwrap().is_none());

        // Another user may track the same skill.
        assert!(insert_progress(&pool, Uuid::new_v4(), "Rust", 10)
            .await
            .unwrap()
            .is_some());

        let rows = list_progress(&pool, user_id, None).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].current_level, Some(30));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_set_level_writes_level_and_percentage_together(pool: PgPool) {
        let user_id = Uuid::new_v4();
        let row = insert_progress(&pool, user_id, "SQL", 40).await.unwrap().unwrap();

        let updated = set_level(&pool, user_id, row.id, 65)
            .await
            .unwrap()
            .expect("owner can update");
        assert_eq!(updated.current_level, Some(65));
        assert_eq!(updated.progress_percentage, Some(65));
        assert!(updated.last_updated >= row.last_updated);

        let stored = get_progress(&pool, user_id, row.id).await.unwrap().unwrap();
        assert_eq!(stored.current_level, stored.progress_percentage);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_records_are_scoped_to_their_owner(pool: PgPool) {
        let owner = Uuid::new_v4();
        let row = insert_progress(&pool, owner, "Go", 10).await.unwrap().unwrap();

        let stranger = Uuid::new_v4();
        assert!(get_progress(&pool, stranger, row.id).await.unwrap().is_none());
        assert!(set_level(&pool, stranger, row.id, 100).await.unwrap().is_none());

        let stored = get_progress(&pool, owner, row.id).await.unwrap().unwrap();
        assert_eq!(stored.current_level, Some(10));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_list_is_newest_updated_first_and_limited(pool: PgPool) {
        let user_id = Uuid::new_v4();
        let first = insert_progress(&pool, user_id, "Rust", 10).await.unwrap().unwrap();
        insert_progress(&pool, user_id, "Go", 10).await.unwrap().unwrap();
        set_level(&pool, user_id, first.id, 20).await.unwrap().unwrap();

        let rows = list_progress(&pool, user_id, Some(1)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].skill_name, "Rust");
    }
}
