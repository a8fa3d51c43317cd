use std::collections::BTreeMap;

use axum::{extract::State, Json};
use tracing::instrument;

use crate::{error::ApiResult, respond::ApiData, state::AppState};

use super::{
    dto::{AnalyticsResponse, ExperienceCount},
    repo,
};

/// Band a career length into the dashboard's seniority labels.
pub fn experience_level(years: f64) -> &'static str {
    if years < 2.0 {
        "Fresher (0-2 years)"
    } else if years < 5.0 {
        "Mid-level (2-5 years)"
    } else if years < 10.0 {
        "Senior (5-10 years)"
    } else {
        "Expert (10+ years)"
    }
}

pub fn bucket_experience(values: &[f64]) -> Vec<ExperienceCount> {
    let mut counts: BTreeMap<&'static str, i64> = BTreeMap::new();
    for &years in values {
        *counts.entry(experience_level(years)).or_insert(0) += 1;
    }
    let mut stats: Vec<ExperienceCount> = counts
        .into_iter()
        .map(|(level, count)| ExperienceCount {
            experience_level: level.to_string(),
            count,
        })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

#[instrument(skip(state))]
pub async fn analytics(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiData<AnalyticsResponse>>> {
    let profession_stats = repo::count_by_profession(&state.db).await?;
    let location_stats = repo::count_by_location(&state.db).await?;
    let education_stats = repo::count_by_education(&state.db).await?;
    let experience_stats = bucket_experience(&repo::experience_values(&state.db).await?);

    Ok(ApiData::ok(AnalyticsResponse {
        profession_stats,
        location_stats,
        education_stats,
        experience_stats,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_have_half_open_boundaries() {
        assert_eq!(experience_level(0.0), "Fresher (0-2 years)");
        assert_eq!(experience_level(1.5), "Fresher (0-2 years)");
        assert_eq!(experience_level(2.0), "Mid-level (2-5 years)");
        assert_eq!(experience_level(4.9), "Mid-level (2-5 years)");
        assert_eq!(experience_level(5.0), "Senior (5-10 years)");
        assert_eq!(experience_level(9.99), "Senior (5-10 years)");
        assert_eq!(experience_level(10.0), "Expert (10+ years)");
        assert_eq!(experience_level(25.0), "Expert (10+ years)");
    }

    #[test]
    fn buckets_count_and_sort_descending() {
        let stats = bucket_experience(&[1.0, 1.5, 0.5, 3.0, 12.0]);
        assert_eq!(stats[0].experience_level, "Fresher (0-2 years)");
        assert_eq!(stats[0].count, 3);
        assert_eq!(stats.len(), 3);
        assert!(stats.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        assert!(bucket_experience(&[]).is_empty());
    }
}
