use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::decode_list;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub education: Option<Value>,
    pub experience: Option<Value>,
    pub skills: Option<Value>,
    pub career_aspirations: Option<String>,
    pub avatar_url: Option<String>,
    pub resume_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A user's profile with its jsonb blobs decoded.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<String>,
    pub career_aspirations: Option<String>,
    pub avatar_url: Option<String>,
    pub resume_url: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Name shown in greetings: the full name when set, otherwise the email.
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => &self.email,
        }
    }
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            education: decode_list("profiles.education", row.education.as_ref()),
            experience: decode_list("profiles.experience", row.experience.as_ref()),
            skills: decode_list("profiles.skills", row.skills.as_ref()),
            user_id: row.user_id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            location: row.location,
            bio: row.bio,
            career_aspirations: row.career_aspirations,
            avatar_url: row.avatar_url,
            resume_url: row.resume_url,
            updated_at: row.updated_at,
        }
    }
}
