use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::ProfileRequest;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub profession: String,
    pub education: String,
    pub experience: f64,
    pub skills: String,
    pub current_location: String,
    pub phone: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub salary_range: Option<String>,
    pub availability: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

pub(crate) const PROFILE_COLUMNS: &str = "id, user_id, full_name, profession, education, \
     experience, skills, current_location, phone, email, company, salary_range, availability, \
     created_at, updated_at";

impl Profile {
    /// One row per user: the insert either lands fresh (both timestamps set
    /// to now) or replaces every field of the existing row and refreshes
    /// `updated_at` only.
    pub async fn upsert(
        db: &PgPool,
        user_id: Uuid,
        req: &ProfileRequest,
    ) -> anyhow::Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            INSERT INTO professional_profiles
                (user_id, full_name, profession, education, experience, skills,
                 current_location, phone, email, company, salary_range, availability)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (user_id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                profession = EXCLUDED.profession,
                education = EXCLUDED.education,
                experience = EXCLUDED.experience,
                skills = EXCLUDED.skills,
                current_location = EXCLUDED.current_location,
                phone = EXCLUDED.phone,
                email = EXCLUDED.email,
                company = EXCLUDED.company,
                salary_range = EXCLUDED.salary_range,
                availability = EXCLUDED.availability,
                updated_at = now()
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&req.full_name)
        .bind(&req.profession)
        .bind(&req.education)
        .bind(req.experience)
        .bind(&req.skills)
        .bind(&req.current_location)
        .bind(&req.phone)
        .bind(&req.profile_email)
        .bind(&req.company)
        .bind(&req.salary_range)
        .bind(&req.availability)
        .fetch_one(db)
        .await?;
        Ok(profile)
    }
}
