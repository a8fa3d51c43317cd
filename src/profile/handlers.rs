use axum::{extract::State, Json};
use tracing::{info, instrument};

use crate::{
    auth::jwt::AuthUser,
    error::ApiResult,
    respond::ApiMessage,
    state::AppState,
};

use super::{dto::ProfileRequest, repo::Profile};

#[instrument(skip(state, payload))]
pub async fn upsert_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ProfileRequest>,
) -> ApiResult<Json<ApiMessage>> {
    let profile = Profile::upsert(&state.db, user_id, &payload).await?;
    info!(user_id = %user_id, profile_id = %profile.id, "profile upserted");
    Ok(ApiMessage::ok("Profile updated successfully!"))
}
