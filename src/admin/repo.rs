use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::account::repo::{User, USER_COLUMNS};
use crate::feedback::repo::{Feedback, FEEDBACK_COLUMNS};
use crate::profile::repo::{Profile, PROFILE_COLUMNS};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AdminUser {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_login: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

const ADMIN_COLUMNS: &str =
    "id, username, password_hash, full_name, role, is_active, last_login, created_at";

impl AdminUser {
    pub async fn find_active_by_username(
        db: &PgPool,
        username: &str,
    ) -> anyhow::Result<Option<AdminUser>> {
        let admin = sqlx::query_as::<_, AdminUser>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admin_users WHERE username = $1 AND is_active = TRUE"
        ))
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(admin)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<AdminUser>> {
        let admin = sqlx::query_as::<_, AdminUser>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admin_users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(admin)
    }

    pub async fn touch_last_login(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("UPDATE admin_users SET last_login = now() WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}

/// Append one audit row for an admin mutation.
pub async fn log_activity(
    db: &PgPool,
    admin_id: Uuid,
    action: &str,
    target_type: &str,
    target_id: Option<Uuid>,
    description: &str,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO admin_activity_log (admin_id, action, target_type, target_id, description)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(admin_id)
    .bind(action)
    .bind(target_type)
    .bind(target_id)
    .bind(description)
    .execute(db)
    .await?;
    Ok(())
}

// --- user listing ---

#[derive(Debug, Default)]
pub struct UserFilter<'a> {
    pub search: Option<&'a str>,
    pub status: Option<&'a str>,
}

fn push_user_filters<'a>(qb: &mut QueryBuilder<'a, Postgres>, filter: &UserFilter<'a>) {
    if let Some(search) = filter.search {
        let pattern = format!("%{search}%");
        qb.push(" AND (username ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR email ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ");
        qb.push_bind(status);
    }
}

pub async fn count_users(db: &PgPool, filter: &UserFilter<'_>) -> anyhow::Result<i64> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM users WHERE 1=1");
    push_user_filters(&mut qb, filter);
    let total = qb.build_query_scalar::<i64>().fetch_one(db).await?;
    Ok(total)
}

pub async fn list_users(
    db: &PgPool,
    filter: &UserFilter<'_>,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<User>> {
    let mut qb = QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users WHERE 1=1"));
    push_user_filters(&mut qb, filter);
    qb.push(" ORDER BY created_at DESC LIMIT ");
    qb.push_bind(limit);
    qb.push(" OFFSET ");
    qb.push_bind(offset);
    let users = qb.build_query_as::<User>().fetch_all(db).await?;
    Ok(users)
}

// --- profile listing ---

#[derive(Debug, Default)]
pub struct ProfileFilter<'a> {
    pub search: Option<&'a str>,
    pub profession: Option<&'a str>,
}

fn push_profile_filters<'a>(qb: &mut QueryBuilder<'a, Postgres>, filter: &ProfileFilter<'a>) {
    if let Some(search) = filter.search {
        let pattern = format!("%{search}%");
        qb.push(" AND (full_name ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR email ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR company ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
    if let Some(profession) = filter.profession {
        qb.push(" AND profession = ");
        qb.push_bind(profession);
    }
}

pub async fn count_profiles(db: &PgPool, filter: &ProfileFilter<'_>) -> anyhow::Result<i64> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM professional_profiles WHERE 1=1");
    push_profile_filters(&mut qb, filter);
    let total = qb.build_query_scalar::<i64>().fetch_one(db).await?;
    Ok(total)
}

pub async fn list_profiles(
    db: &PgPool,
    filter: &ProfileFilter<'_>,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Profile>> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT {PROFILE_COLUMNS} FROM professional_profiles WHERE 1=1"
    ));
    push_profile_filters(&mut qb, filter);
    qb.push(" ORDER BY updated_at DESC LIMIT ");
    qb.push_bind(limit);
    qb.push(" OFFSET ");
    qb.push_bind(offset);
    let profiles = qb.build_query_as::<Profile>().fetch_all(db).await?;
    Ok(profiles)
}

// --- feedback listing ---

pub async fn count_feedback(db: &PgPool) -> anyhow::Result<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM feedback")
        .fetch_one(db)
        .await?;
    Ok(total)
}

pub async fn list_feedback(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<Feedback>> {
    let rows = sqlx::query_as::<_, Feedback>(&format!(
        "SELECT {FEEDBACK_COLUMNS} FROM feedback ORDER BY created_at DESC LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

// --- dashboard stats ---

pub async fn count_all_users(db: &PgPool) -> anyhow::Result<i64> {
    Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(db)
        .await?)
}

pub async fn count_all_profiles(db: &PgPool) -> anyhow::Result<i64> {
    Ok(
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM professional_profiles")
            .fetch_one(db)
            .await?,
    )
}

pub async fn count_registrations_today(db: &PgPool) -> anyhow::Result<i64> {
    Ok(sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM users WHERE created_at::date = CURRENT_DATE",
    )
    .fetch_one(db)
    .await?)
}

// --- export queries ---

/// Exportable column subset of a user row; the credential hash never
/// leaves the database.
#[derive(Debug, Serialize, FromRow)]
pub struct UserExportRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub mobile: Option<String>,
    pub status: String,
    pub email_verified: bool,
    pub mobile_verified: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub async fn export_users(db: &PgPool) -> anyhow::Result<Vec<UserExportRow>> {
    let rows = sqlx::query_as::<_, UserExportRow>(
        r#"
        SELECT id, username, email, mobile, status, email_verified, mobile_verified, created_at
        FROM users ORDER BY created_at DESC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

#[derive(Debug, Serialize, FromRow)]
pub struct ProfileExportRow {
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
    pub username: String,
    pub user_email: String,
}

pub async fn export_profiles(db: &PgPool) -> anyhow::Result<Vec<ProfileExportRow>> {
    let rows = sqlx::query_as::<_, ProfileExportRow>(
        r#"
        SELECT pp.id, pp.user_id, pp.full_name, pp.profession, pp.education, pp.experience,
               pp.skills, pp.current_location, pp.phone, pp.email, pp.company, pp.salary_range,
               pp.availability, pp.created_at, pp.updated_at,
               u.username, u.email AS user_email
        FROM professional_profiles pp
        JOIN users u ON pp.user_id = u.id
        ORDER BY pp.updated_at DESC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn export_feedback(db: &PgPool) -> anyhow::Result<Vec<Feedback>> {
    let rows = sqlx::query_as::<_, Feedback>(&format!(
        "SELECT {FEEDBACK_COLUMNS} FROM feedback ORDER BY created_at DESC"
    ))
    .fetch_all(db)
    .await?;
    Ok(rows)
}
