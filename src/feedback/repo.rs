use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Feedback {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub feedback_type: String,
    pub subject: String,
    pub message: String,
    pub rating: i32,
    pub user_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub(crate) const FEEDBACK_COLUMNS: &str =
    "id, name, email, feedback_type, subject, message, rating, user_id, created_at";

impl Feedback {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        feedback_type: &str,
        subject: &str,
        message: &str,
        rating: i32,
        user_id: Option<Uuid>,
    ) -> anyhow::Result<Feedback> {
        let row = sqlx::query_as::<_, Feedback>(&format!(
            r#"
            INSERT INTO feedback (name, email, feedback_type, subject, message, rating, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {FEEDBACK_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(email)
        .bind(feedback_type)
        .bind(subject)
        .bind(message)
        .bind(rating)
        .bind(user_id)
        .fetch_one(db)
        .await?;
        Ok(row)
    }
}
