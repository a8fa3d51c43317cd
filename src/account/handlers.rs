use axum::{
    extract::{FromRef, State},
    Json,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        validation::is_valid_email,
    },
    error::{ApiError, ApiResult},
    otp::repo::OtpVerification,
    respond::ApiData,
    state::AppState,
};

use super::{
    dto::{AuthResponse, LoginRequest, PublicUser, RegisterRequest},
    repo::User,
};

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> ApiResult<Json<ApiData<AuthResponse>>> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::validation("Invalid email"));
    }

    // A supplied OTP must reference a challenge already verified for this
    // email and still inside its validity window.
    if let Some(otp) = payload.otp.as_deref() {
        let verified = OtpVerification::find_verified(&state.db, otp, &payload.email).await?;
        if verified.is_none() {
            warn!(email = %payload.email, "registration without verified otp");
            return Err(ApiError::validation("Please verify your OTP first!"));
        }
    }

    if User::find_by_username_or_email(&state.db, &payload.username, &payload.email)
        .await?
        .is_some()
    {
        warn!(username = %payload.username, "duplicate registration");
        return Err(ApiError::conflict("Account already exists!"));
    }

    let hash = hash_password(&payload.password);
    let user = User::create(
        &state.db,
        &payload.username,
        &payload.email,
        payload.mobile.as_deref(),
        &hash,
    )
    .await?;

    // Consume the challenge so it cannot gate a second registration.
    if let Some(otp) = payload.otp.as_deref() {
        OtpVerification::delete_by_code(&state.db, otp).await?;
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign_user(user.id)?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(ApiData::ok(AuthResponse {
        token,
        user: PublicUser {
            id: user.id,
            username: user.username,
            email: user.email,
        },
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<ApiData<AuthResponse>>> {
    let user = User::find_by_username(&state.db, &payload.username)
        .await?
        .ok_or_else(|| {
            warn!(username = %payload.username, "login unknown username");
            ApiError::unauthorized("Incorrect username/password!")
        })?;

    if !verify_password(&payload.password, &user.password_hash) {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::unauthorized("Incorrect username/password!"));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign_user(user.id)?;

    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(ApiData::ok(AuthResponse {
        token,
        user: PublicUser {
            id: user.id,
            username: user.username,
            email: user.email,
        },
    }))
}
