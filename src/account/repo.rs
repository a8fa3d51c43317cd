use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub mobile: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email_verified: bool,
    pub mobile_verified: bool,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub(crate) const USER_COLUMNS: &str = "id, username, email, mobile, password_hash, \
     email_verified, mobile_verified, status, created_at";

impl User {
    pub async fn find_by_username(db: &PgPool, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Duplicate check used by registration; unique on both columns.
    pub async fn find_by_username_or_email(
        db: &PgPool,
        username: &str,
        email: &str,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1 OR email = $2"
        ))
        .bind(username)
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn create(
        db: &PgPool,
        username: &str,
        email: &str,
        mobile: Option<&str>,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, mobile, password_hash,
                               email_verified, mobile_verified, status)
            VALUES ($1, $2, $3, $4, TRUE, $5, 'active')
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(email)
        .bind(mobile)
        .bind(password_hash)
        .bind(mobile.is_some())
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    pub async fn update_status(db: &PgPool, user_id: Uuid, status: &str) -> anyhow::Result<u64> {
        let result = sqlx::query("UPDATE users SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
