use sqlx::{FromRow, PgPool, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct OtpVerification {
    pub id: Uuid,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub otp_code: String,
    pub otp_type: String,
    pub expires_at: OffsetDateTime,
    pub is_verified: bool,
    pub attempts: i32,
    pub created_at: OffsetDateTime,
}

const COLUMNS: &str =
    "id, email, mobile, otp_code, otp_type, expires_at, is_verified, attempts, created_at";

impl OtpVerification {
    /// Garbage-collect every expired challenge, regardless of contact.
    pub async fn delete_expired(db: &PgPool) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM otp_verifications WHERE expires_at < now()")
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn create(
        db: &PgPool,
        email: Option<&str>,
        mobile: Option<&str>,
        otp_code: &str,
        otp_type: &str,
        expires_at: OffsetDateTime,
    ) -> anyhow::Result<OtpVerification> {
        let row = sqlx::query_as::<_, OtpVerification>(
            r#"
            INSERT INTO otp_verifications (email, mobile, otp_code, otp_type, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, mobile, otp_code, otp_type, expires_at, is_verified, attempts, created_at
            "#,
        )
        .bind(email)
        .bind(mobile)
        .bind(otp_code)
        .bind(otp_type)
        .bind(expires_at)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// Find an unexpired, unconsumed challenge matching the code and any
    /// contact fields the caller supplied.
    pub async fn find_valid(
        db: &PgPool,
        otp_code: &str,
        email: Option<&str>,
        mobile: Option<&str>,
    ) -> anyhow::Result<Option<OtpVerification>> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT {COLUMNS} FROM otp_verifications WHERE otp_code = "
        ));
        qb.push_bind(otp_code);
        qb.push(" AND expires_at > now() AND is_verified = FALSE");
        if let Some(email) = email {
            qb.push(" AND email = ");
            qb.push_bind(email);
        }
        if let Some(mobile) = mobile {
            qb.push(" AND mobile = ");
            qb.push_bind(mobile);
        }
        let row = qb
            .build_query_as::<OtpVerification>()
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    pub async fn mark_verified(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("UPDATE otp_verifications SET is_verified = TRUE WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Attempts are tracked per code, not per contact.
    pub async fn bump_attempts(db: &PgPool, otp_code: &str) -> anyhow::Result<()> {
        sqlx::query("UPDATE otp_verifications SET attempts = attempts + 1 WHERE otp_code = $1")
            .bind(otp_code)
            .execute(db)
            .await?;
        Ok(())
    }

    /// A challenge that passed verification and may gate a registration.
    pub async fn find_verified(
        db: &PgPool,
        otp_code: &str,
        email: &str,
    ) -> anyhow::Result<Option<OtpVerification>> {
        let row = sqlx::query_as::<_, OtpVerification>(&format!(
            r#"
            SELECT {COLUMNS} FROM otp_verifications
            WHERE otp_code = $1 AND email = $2 AND is_verified = TRUE AND expires_at > now()
            "#
        ))
        .bind(otp_code)
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn delete_by_code(db: &PgPool, otp_code: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM otp_verifications WHERE otp_code = $1")
            .bind(otp_code)
            .execute(db)
            .await?;
        Ok(())
    }
}
