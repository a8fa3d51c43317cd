use serde::Serialize;
use sqlx::{FromRow, PgPool, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

/// A directory hit: the profile plus the owning account's username.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SearchResult {
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
}

/// Conjunctive directory filter: case-insensitive substring on the text
/// facets, a floor on experience. Unfiltered fields are left out of the
/// predicate entirely.
pub async fn search(
    db: &PgPool,
    profession: Option<&str>,
    location: Option<&str>,
    education: Option<&str>,
    experience_min: Option<f64>,
) -> anyhow::Result<Vec<SearchResult>> {
    let mut qb = QueryBuilder::new(
        "SELECT pp.id, pp.user_id, pp.full_name, pp.profession, pp.education, \
         pp.experience, pp.skills, pp.current_location, pp.phone, pp.email, \
         pp.company, pp.salary_range, pp.availability, pp.created_at, pp.updated_at, \
         u.username \
         FROM professional_profiles pp \
         JOIN users u ON pp.user_id = u.id \
         WHERE 1=1",
    );

    if let Some(profession) = profession {
        qb.push(" AND pp.profession ILIKE ");
        qb.push_bind(format!("%{profession}%"));
    }
    if let Some(location) = location {
        qb.push(" AND pp.current_location ILIKE ");
        qb.push_bind(format!("%{location}%"));
    }
    if let Some(education) = education {
        qb.push(" AND pp.education ILIKE ");
        qb.push_bind(format!("%{education}%"));
    }
    if let Some(experience_min) = experience_min {
        qb.push(" AND pp.experience >= ");
        qb.push_bind(experience_min);
    }

    let rows = qb.build_query_as::<SearchResult>().fetch_all(db).await?;
    Ok(rows)
}
