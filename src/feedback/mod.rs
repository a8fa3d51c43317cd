mod dto;
pub mod handlers;
pub mod repo;

use crate::state::AppState;
use axum::{routing::post, Router};

pub fn router() -> Router<AppState> {
    Router::new().route("/feedback", post(handlers::submit_feedback))
}
