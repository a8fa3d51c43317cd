use axum::{extract::State, Json};
use rand::Rng;
use time::{Duration, OffsetDateTime};
use tracing::{info, instrument, warn};

use crate::{
    error::{ApiError, ApiResult},
    respond::ApiMessage,
    state::AppState,
};

use super::{
    dto::{SendOtpRequest, VerifyOtpRequest},
    repo::OtpVerification,
};

/// One-time codes stay valid for ten minutes.
const OTP_TTL_MINUTES: i64 = 10;

fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

fn wants_email(otp_type: &str) -> bool {
    matches!(otp_type, "email" | "both")
}

fn wants_mobile(otp_type: &str) -> bool {
    matches!(otp_type, "mobile" | "both")
}

#[instrument(skip(state, payload))]
pub async fn send_otp(
    State(state): State<AppState>,
    Json(payload): Json<SendOtpRequest>,
) -> ApiResult<Json<ApiMessage>> {
    if payload.email.is_none() && payload.mobile.is_none() {
        return Err(ApiError::validation("Email or mobile number required"));
    }

    let code = generate_code();
    let expires_at = OffsetDateTime::now_utc() + Duration::minutes(OTP_TTL_MINUTES);

    // Lazy cleanup: drop every expired challenge before storing a new one.
    OtpVerification::delete_expired(&state.db).await?;
    OtpVerification::create(
        &state.db,
        payload.email.as_deref(),
        payload.mobile.as_deref(),
        &code,
        &payload.otp_type,
        expires_at,
    )
    .await?;

    let mut email_sent = false;
    let mut sms_sent = false;

    if let Some(email) = payload.email.as_deref() {
        if wants_email(&payload.otp_type) {
            let body = format!(
                "<html><body>\
                 <h2>Email Verification</h2>\
                 <p>Your verification code is: <strong>{code}</strong></p>\
                 <p>This code will expire in {OTP_TTL_MINUTES} minutes.</p>\
                 <p>If you didn't request this, please ignore this email.</p>\
                 </body></html>"
            );
            email_sent = state.mailer.send(email, "Email Verification", &body).await;
        }
    }

    if let Some(mobile) = payload.mobile.as_deref() {
        if wants_mobile(&payload.otp_type) {
            let body =
                format!("Your verification code is: {code}. Valid for {OTP_TTL_MINUTES} minutes.");
            sms_sent = state.sms.send(mobile, &body).await;
        }
    }

    if email_sent || sms_sent {
        info!(email_sent, sms_sent, "otp dispatched");
        Ok(ApiMessage::ok("OTP sent successfully!"))
    } else {
        warn!("no otp channel succeeded");
        Err(ApiError::Internal(anyhow::anyhow!(
            "Failed to send OTP. Please try again."
        )))
    }
}

#[instrument(skip(state, payload))]
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(payload): Json<VerifyOtpRequest>,
) -> ApiResult<Json<ApiMessage>> {
    let found = OtpVerification::find_valid(
        &state.db,
        &payload.otp,
        payload.email.as_deref(),
        payload.mobile.as_deref(),
    )
    .await?;

    match found {
        Some(record) => {
            OtpVerification::mark_verified(&state.db, record.id).await?;
            info!(otp_id = %record.id, "otp verified");
            Ok(ApiMessage::ok("OTP verified successfully!"))
        }
        None => {
            OtpVerification::bump_attempts(&state.db, &payload.otp).await?;
            warn!("otp verification failed");
            Err(ApiError::validation("Invalid or expired OTP!"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_six_digits() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(code.chars().next(), Some('0'));
        }
    }

    #[test]
    fn channel_selection_honors_type() {
        assert!(wants_email("email"));
        assert!(wants_email("both"));
        assert!(!wants_email("mobile"));
        assert!(wants_mobile("mobile"));
        assert!(wants_mobile("both"));
        assert!(!wants_mobile("email"));
    }
}
