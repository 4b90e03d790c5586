//! Skill gap analysis: runs the configured matcher for one user against one
//! job role and persists the snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::analysis::matcher::{SkillMatch, SkillMatchReport, SkillMatcher};
use crate::analysis::store::upsert_skill_gap;
use crate::errors::AppError;
use crate::jobs::store::get_active_job_role;
use crate::models::decode_list;
use crate::models::job::JobRole;
use crate::models::profile::Profile;
use crate::models::skill_gap::SkillGapRow;
use crate::profile::store::get_profile;

/// Result returned to the caller after an analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct SkillGapAnalysis {
    pub job_role: JobRole,
    pub current_skills: Vec<String>,
    pub report: SkillMatchReport,
    pub matched_count: usize,
    pub missing_count: usize,
    /// Skills to develop, in the role's order.
    pub learning_path: Vec<String>,
}

impl SkillGapAnalysis {
    pub fn new(job_role: JobRole, current_skills: Vec<String>, report: SkillMatchReport) -> Self {
        let learning_path = report.missing_skills();
        SkillGapAnalysis {
            matched_count: report.per_skill.len() - learning_path.len(),
            missing_count: learning_path.len(),
            learning_path,
            job_role,
            current_skills,
            report,
        }
    }
}

/// A stored snapshot with its jsonb columns decoded.
#[derive(Debug, Clone, Serialize)]
pub struct SkillGapRecord {
    pub target_job_role_id: Option<Uuid>,
    pub current_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub skill_gaps: Vec<SkillMatch>,
    pub recommendations: Vec<String>,
    pub match_percentage: i32,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<SkillGapRow> for SkillGapRecord {
    fn from(row: SkillGapRow) -> Self {
        SkillGapRecord {
            current_skills: decode_list("skill_gap_analysis.current_skills", row.current_skills.as_ref()),
            missing_skills: decode_list("skill_gap_analysis.missing_skills", row.missing_skills.as_ref()),
            skill_gaps: decode_list("skill_gap_analysis.skill_gaps", row.skill_gaps.as_ref()),
            recommendations: decode_list(
                "skill_gap_analysis.recommendations",
                row.recommendations.as_ref(),
            ),
            target_job_role_id: row.target_job_role_id,
            match_percentage: row.match_percentage.unwrap_or(0),
            updated_at: row.updated_at,
        }
    }
}

/// Loads the user's skills and the role, matches them and upserts the record.
/// A user without a profile is analysed with an empty skill list. Inactive
/// roles are reported as not found.
pub async fn analyze_skill_gap(
    pool: &PgPool,
    matcher: &dyn SkillMatcher,
    user_id: Uuid,
    job_role_id: Uuid,
) -> Result<SkillGapAnalysis, AppError> {
    let job_role: JobRole = get_active_job_role(pool, job_role_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job role {job_role_id} not found")))?
        .into();

    let current_skills = get_profile(pool, user_id)
        .await?
        .map(|row| Profile::from(row).skills)
        .unwrap_or_default();

    let report = matcher.match_skills(&current_skills, &job_role.required_skills);
    upsert_skill_gap(pool, user_id, job_role_id, &current_skills, &report).await?;

    Ok(SkillGapAnalysis::new(job_role, current_skills, report))
}
