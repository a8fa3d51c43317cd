use axum::Json;
use serde::Serialize;

/// Success envelope carrying a human-readable message.
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

impl ApiMessage {
    pub fn ok(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
        })
    }
}

/// Success envelope carrying a data payload.
#[derive(Debug, Serialize)]
pub struct ApiData<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiData<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_envelope_shape() {
        let Json(body) = ApiMessage::ok("OTP sent successfully!");
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "OTP sent successfully!");
    }

    #[test]
    fn data_envelope_shape() {
        let Json(body) = ApiData::ok(vec![1, 2, 3]);
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
    }
}
