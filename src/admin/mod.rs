mod dto;
pub mod export;
pub mod handlers;
pub mod repo;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin-login", post(handlers::admin_login))
        .route("/admin-session", get(handlers::admin_session))
        .route("/admin-stats", get(handlers::admin_stats))
        .route("/admin-users", get(handlers::list_users))
        .route("/admin-profiles", get(handlers::list_profiles))
        .route("/admin-feedback", get(handlers::list_feedback))
        .route("/admin-update-user-status", post(handlers::update_user_status))
        .route("/admin-export/:kind", get(handlers::export))
}
