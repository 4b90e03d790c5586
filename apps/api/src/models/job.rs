use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::decode_list;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRoleRow {
    pub id: Uuid,
    pub title: String,
    pub company: Option<String>,
    pub description: Option<String>,
    pub required_skills: Option<Value>,
    pub preferred_skills: Option<Value>,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub experience_level: Option<String>,
    pub is_active: Option<bool>,
    pub posted_by: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A posted position. Read-only from this service's point of view.
#[derive(Debug, Clone, Serialize)]
pub struct JobRole {
    pub id: Uuid,
    pub title: String,
    pub company: Option<String>,
    pub description: Option<String>,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub experience_level: Option<String>,
    pub is_active: bool,
}

impl From<JobRoleRow> for JobRole {
    fn from(row: JobRoleRow) -> Self {
        JobRole {
            required_skills: decode_list("job_roles.required_skills", row.required_skills.as_ref()),
            preferred_skills: decode_list(
                "job_roles.preferred_skills",
                row.preferred_skills.as_ref(),
            ),
            id: row.id,
            title: row.title,
            company: row.company,
            description: row.description,
            location: row.location,
            salary_range: row.salary_range,
            experience_level: row.experience_level,
            is_active: row.is_active.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRecommendationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_role_id: Option<Uuid>,
    pub match_percentage: Option<i32>,
    pub matching_skills: Option<Value>,
    pub missing_skills: Option<Value>,
    pub recommendation_reason: Option<String>,
    pub is_bookmarked: Option<bool>,
    pub is_applied: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobRecommendation {
    pub job_role_id: Option<Uuid>,
    pub match_percentage: i32,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendation_reason: Option<String>,
    pub is_bookmarked: bool,
    pub is_applied: bool,
}

impl From<JobRecommendationRow> for JobRecommendation {
    fn from(row: JobRecommendationRow) -> Self {
        JobRecommendation {
            matching_skills: decode_list(
                "job_recommendations.matching_skills",
                row.matching_skills.as_ref(),
            ),
            missing_skills: decode_list(
                "job_recommendations.missing_skills",
                row.missing_skills.as_ref(),
            ),
            job_role_id: row.job_role_id,
            match_percentage: row.match_percentage.unwrap_or(0),
            recommendation_reason: row.recommendation_reason,
            is_bookmarked: row.is_bookmarked.unwrap_or(false),
            is_applied: row.is_applied.unwrap_or(false),
        }
    }
}

/// An entry in the `skills_master` catalog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CatalogSkillRow {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_role_tolerates_missing_skill_lists() {
        let row = JobRoleRow {
            id: Uuid::new_v4(),
            title: "Data Engineer".to_string(),
            company: Some("Acme".to_string()),
            description: None,
            required_skills: Some(json!(["Python", "Airflow"])),
            preferred_skills: None,
            location: None,
            salary_range: None,
            experience_level: None,
            is_active: None,
            posted_by: None,
            created_at: None,
            updated_at: None,
        };
        let role = JobRole::from(row);
        assert_eq!(role.required_skills, vec!["Python", "Airflow"]);
        assert!(role.preferred_skills.is_empty());
        assert!(!role.is_active);
    }
}
