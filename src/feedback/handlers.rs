use axum::{extract::State, Json};
use tracing::{info, instrument};

use crate::{
    auth::jwt::AuthUser,
    error::ApiResult,
    respond::ApiMessage,
    state::AppState,
};

use super::{dto::FeedbackRequest, repo::Feedback};

/// Feedback is open to anonymous visitors; a logged-in submitter gets
/// linked to the row.
#[instrument(skip(state, user, payload))]
pub async fn submit_feedback(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Json(payload): Json<FeedbackRequest>,
) -> ApiResult<Json<ApiMessage>> {
    let user_id = user.map(|AuthUser(id)| id);
    let row = Feedback::create(
        &state.db,
        &payload.name,
        &payload.email,
        &payload.feedback_type,
        &payload.subject,
        &payload.message,
        payload.rating,
        user_id,
    )
    .await?;
    info!(feedback_id = %row.id, "feedback recorded");
    Ok(ApiMessage::ok(
        "Thank you for your feedback! We appreciate your input.",
    ))
}
