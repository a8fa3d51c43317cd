use serde::Deserialize;

/// Delivery channel for the one-time code.
fn default_channel() -> String {
    "both".to_string()
}

#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    pub email: Option<String>,
    pub mobile: Option<String>,
    #[serde(rename = "type", default = "default_channel")]
    pub otp_type: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub otp: String,
}
