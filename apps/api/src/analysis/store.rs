use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::matcher::SkillMatchReport;
use crate::models::encode_list;
use crate::models::job::CatalogSkillRow;
use crate::models::skill_gap::SkillGapRow;

/// Writes the snapshot for (user, job role), replacing any earlier one.
/// No history is kept.
pub async fn upsert_skill_gap(
    pool: &PgPool,
    user_id: Uuid,
    job_role_id: Uuid,
    current_skills: &[String],
    report: &SkillMatchReport,
) -> Result<SkillGapRow, sqlx::Error> {
    let missing = report.missing_skills();
    let skill_gaps = serde_json::to_value(&report.per_skill)
        .unwrap_or_else(|_| serde_json::Value::Array(Vec::new()));

    let row = sqlx::query_as::<_, SkillGapRow>(
        r#"
        INSERT INTO skill_gap_analysis
            (user_id, target_job_role_id, current_skills, missing_skills,
             skill_gaps, recommendations, match_percentage, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, now())
        ON CONFLICT (user_id, target_job_role_id) DO UPDATE
        SET current_skills = EXCLUDED.current_skills,
            missing_skills = EXCLUDED.missing_skills,
            skill_gaps = EXCLUDED.skill_gaps,
            recommendations = EXCLUDED.recommendations,
            match_percentage = EXCLUDED.match_percentage,
            updated_at = EXCLUDED.updated_at
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(job_role_id)
    .bind(encode_list(current_skills))
    .bind(encode_list(&missing))
    .bind(skill_gaps)
    // Learning path: the missing skills, in the role's order.
    .bind(encode_list(&missing))
    .bind(report.match_percentage)
    .fetch_one(pool)
    .await?;

    info!(
        "Stored skill gap for user {user_id} / role {job_role_id}: {}%",
        report.match_percentage
    );
    Ok(row)
}

pub async fn get_skill_gap(
    pool: &PgPool,
    user_id: Uuid,
    job_role_id: Uuid,
) -> Result<Option<SkillGapRow>, sqlx::Error> {
    sqlx::query_as::<_, SkillGapRow>(
        "SELECT * FROM skill_gap_analysis WHERE user_id = $1 AND target_job_role_id = $2",
    )
    .bind(user_id)
    .bind(job_role_id)
    .fetch_optional(pool)
    .await
}

/// Entries of the `skills_master` catalog, optionally filtered by category.
pub async fn list_catalog_skills(
    pool: &PgPool,
    category: Option<&str>,
) -> Result<Vec<CatalogSkillRow>, sqlx::Error> {
    sqlx::query_as::<_, CatalogSkillRow>(
        r#"
        SELECT * FROM skills_master
        WHERE $1::text IS NULL OR category = $1
        ORDER BY category, name
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}
