mod dto;
pub mod handlers;
pub mod repo;

use crate::state::AppState;
use axum::{routing::post, Router};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send-otp", post(handlers::send_otp))
        .route("/verify-otp", post(handlers::verify_otp))
}
