use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::encode_list;
use crate::models::profile::ProfileRow;

/// Columns the owner can edit directly. Every field is written, so a `None`
/// clears the stored value.
#[derive(Debug, Clone)]
pub struct ProfileChanges<'a> {
    pub full_name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub location: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub skills: &'a [String],
    pub career_aspirations: Option<&'a str>,
}

/// Which stored document a URL belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Avatar,
    Resume,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Avatar => "avatar",
            DocumentKind::Resume => "resume",
        }
    }
}

pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Returns the user's profile, creating an empty one on first access.
/// At most one profile exists per user (`UNIQUE (user_id)`).
pub async fn fetch_or_create_profile(
    pool: &PgPool,
    user_id: Uuid,
    email: &str,
) -> Result<ProfileRow, sqlx::Error> {
    let created = sqlx::query(
        r#"
        INSERT INTO profiles (user_id, email, skills, education, experience)
        VALUES ($1, $2, '[]'::jsonb, '[]'::jsonb, '[]'::jsonb)
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(email)
    .execute(pool)
    .await?
    .rows_affected();

    if created > 0 {
        info!("Created profile for user {user_id}");
    }

    sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    changes: &ProfileChanges<'_>,
) -> Result<ProfileRow, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(
        r#"
        UPDATE profiles
        SET full_name = $2,
            phone = $3,
            location = $4,
            bio = $5,
            skills = $6,
            career_aspirations = $7,
            updated_at = now()
        WHERE user_id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(changes.full_name)
    .bind(changes.phone)
    .bind(changes.location)
    .bind(changes.bio)
    .bind(encode_list(changes.skills))
    .bind(changes.career_aspirations)
    .fetch_one(pool)
    .await
}

pub async fn set_skills(
    pool: &PgPool,
    user_id: Uuid,
    skills: &[String],
) -> Result<ProfileRow, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(
        "UPDATE profiles SET skills = $2, updated_at = now() WHERE user_id = $1 RETURNING *",
    )
    .bind(user_id)
    .bind(encode_list(skills))
    .fetch_one(pool)
    .await
}

pub async fn set_document_url(
    pool: &PgPool,
    user_id: Uuid,
    kind: DocumentKind,
    url: &str,
) -> Result<ProfileRow, sqlx::Error> {
    let sql = match kind {
        DocumentKind::Avatar => {
            "UPDATE profiles SET avatar_url = $2, updated_at = now() WHERE user_id = $1 RETURNING *"
        }
        DocumentKind::Resume => {
            "UPDATE profiles SET resume_url = $2, updated_at = now() WHERE user_id = $1 RETURNING *"
        }
    };
    sqlx::query_as::<_, ProfileRow>(sql)
        .bind(user_id)
        .bind(url)
        .fetch_one(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::Profile;

    #[sqlx::test(migrations = "./migrations")]
    async fn test_fetch_or_create_keeps_one_profile(pool: PgPool) {
        let user_id = Uuid::new_v4();
        let created = fetch_or_create_profile(&pool, user_id, "ada@example.com").await.unwrap();
        let fetched = fetch_or_create_profile(&pool, user_id, "other@example.com").await.unwrap();

        assert_eq!(created.id, fetched.id);
        assert_eq!(fetched.email, "ada@example.com");
        assert!(Profile::from(fetched).skills.is_empty());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_writes_every_editable_column(pool: PgPool) {
        let user_id = Uuid::new_v4();
        fetch_or_create_profile(&pool, user_id, "ada@example.com").await.unwrap();

        let skills = vec!["Rust".to_string(), "SQL".to_string()];
        let changes = ProfileChanges {
            full_name: Some("Ada Lovelace"),
            phone: None,
            location: Some("London"),
            bio: None,
            skills: &skills,
            career_aspirations: Some("Staff engineer"),
        };
        let profile = Profile::from(update_profile(&pool, user_id, &changes).await.unwrap());

        assert_eq!(profile.full_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(profile.location.as_deref(), Some("London"));
        assert_eq!(profile.skills, skills);
        assert!(profile.updated_at.is_some());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_document_url_lands_in_its_column(pool: PgPool) {
        let user_id = Uuid::new_v4();
        fetch_or_create_profile(&pool, user_id, "ada@example.com").await.unwrap();

        let row = set_document_url(&pool, user_id, DocumentKind::Resume, "http://s3/resumes/cv.pdf")
            .await
            .unwrap();
        assert_eq!(row.resume_url.as_deref(), Some("http://s3/resumes/cv.pdf"));
        assert_eq!(row.avatar_url, None);
    }
}
