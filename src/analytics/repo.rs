use sqlx::PgPool;

use super::dto::{EducationCount, LocationCount, ProfessionCount};

pub async fn count_by_profession(db: &PgPool) -> anyhow::Result<Vec<ProfessionCount>> {
    let rows = sqlx::query_as::<_, ProfessionCount>(
        r#"
        SELECT profession, COUNT(*) AS count
        FROM professional_profiles
        GROUP BY profession
        ORDER BY count DESC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn count_by_location(db: &PgPool) -> anyhow::Result<Vec<LocationCount>> {
    let rows = sqlx::query_as::<_, LocationCount>(
        r#"
        SELECT current_location, COUNT(*) AS count
        FROM professional_profiles
        GROUP BY current_location
        ORDER BY count DESC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn count_by_education(db: &PgPool) -> anyhow::Result<Vec<EducationCount>> {
    let rows = sqlx::query_as::<_, EducationCount>(
        r#"
        SELECT education, COUNT(*) AS count
        FROM professional_profiles
        GROUP BY education
        ORDER BY count DESC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn experience_values(db: &PgPool) -> anyhow::Result<Vec<f64>> {
    let values = sqlx::query_scalar::<_, f64>("SELECT experience FROM professional_profiles")
        .fetch_all(db)
        .await?;
    Ok(values)
}
