use axum::{
    extract::{Query, State},
    Json,
};
use tracing::instrument;

use crate::{error::ApiResult, respond::ApiData, state::AppState};

use super::{
    dto::SearchQuery,
    repo::{self, SearchResult},
};

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[instrument(skip(state))]
pub async fn search_profiles(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Json<ApiData<Vec<SearchResult>>>> {
    let results = repo::search(
        &state.db,
        non_empty(&params.profession),
        non_empty(&params.location),
        non_empty(&params.education),
        non_empty(&params.experience).and_then(|s| s.parse::<f64>().ok()),
    )
    .await?;
    Ok(ApiData::ok(results))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filters_are_dropped() {
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&None), None);
        assert_eq!(non_empty(&Some("Engineer".into())), Some("Engineer"));
    }
}
