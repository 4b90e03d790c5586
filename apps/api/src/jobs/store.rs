use sqlx::PgPool;
use uuid::Uuid;

use crate::jobs::recommend::RoleScore;
use crate::models::encode_list;
use crate::models::job::{JobRecommendationRow, JobRoleRow};

pub async fn list_active_job_roles(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<JobRoleRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRoleRow>(
        r#"
        SELECT * FROM job_roles
        WHERE is_active = true
        ORDER BY created_at DESC NULLS LAST, title
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn get_job_role(pool: &PgPool, id: Uuid) -> Result<Option<JobRoleRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRoleRow>("SELECT * FROM job_roles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Only active roles can be analysed or recommended.
pub async fn get_active_job_role(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<JobRoleRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRoleRow>("SELECT * FROM job_roles WHERE id = $1 AND is_active = true")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_job_roles_by_ids(
    pool: &PgPool,
    ids: &[Uuid],
) -> Result<Vec<JobRoleRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRoleRow>("SELECT * FROM job_roles WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await
}

/// Refreshes the scored columns for (user, role). Bookmark and applied flags
/// set by the user survive a refresh.
pub async fn upsert_recommendation(
    pool: &PgPool,
    user_id: Uuid,
    score: &RoleScore,
) -> Result<JobRecommendationRow, sqlx::Error> {
    sqlx::query_as::<_, JobRecommendationRow>(
        r#"
        INSERT INTO job_recommendations
            (user_id, job_role_id, match_percentage, matching_skills,
             missing_skills, recommendation_reason)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id, job_role_id) DO UPDATE
        SET match_percentage = EXCLUDED.match_percentage,
            matching_skills = EXCLUDED.matching_skills,
            missing_skills = EXCLUDED.missing_skills,
            recommendation_reason = EXCLUDED.recommendation_reason
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(score.job_role_id)
    .bind(score.match_percentage)
    .bind(encode_list(&score.matching_skills))
    .bind(encode_list(&score.missing_skills))
    .bind(&score.reason)
    .fetch_one(pool)
    .await
}

pub async fn list_recommendations(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<JobRecommendationRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRecommendationRow>(
        r#"
        SELECT * FROM job_recommendations
        WHERE user_id = $1
        ORDER BY match_percentage DESC NULLS LAST, created_at
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Sets whichever flags are given; `None` leaves a flag unchanged.
pub async fn update_recommendation_flags(
    pool: &PgPool,
    user_id: Uuid,
    job_role_id: Uuid,
    is_bookmarked: Option<bool>,
    is_applied: Option<bool>,
) -> Result<Option<JobRecommendationRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRecommendationRow>(
        r#"
        UPDATE job_recommendations
        SET is_bookmarked = COALESCE($3, is_bookmarked),
            is_applied = COALESCE($4, is_applied)
        WHERE user_id = $1 AND job_role_id = $2
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(job_role_id)
    .bind(is_bookmarked)
    .bind(is_applied)
    .fetch_optional(pool)
    .await
}
