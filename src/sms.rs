use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::config::SmsConfig;

/// Outbound SMS capability. Dispatch failures are reported as `false`,
/// never as errors.
#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send(&self, to: &str, body: &str) -> bool;
}

/// Twilio REST messaging client. Without credentials every send fails,
/// which downgrades `type=both` OTP requests to email-only delivery.
pub struct TwilioSms {
    client: reqwest::Client,
    config: Option<SmsConfig>,
}

impl TwilioSms {
    pub fn new(config: Option<SmsConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl SmsSender for TwilioSms {
    async fn send(&self, to: &str, body: &str) -> bool {
        let Some(config) = &self.config else {
            warn!("sms gateway not configured, dropping message");
            return false;
        };

        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            config.account_sid
        );
        let params = [
            ("To", to),
            ("From", config.from_number.as_str()),
            ("Body", body),
        ];

        match self
            .client
            .post(&url)
            .basic_auth(&config.account_sid, Some(&config.auth_token))
            .form(&params)
            .send()
            .await
        {
            Ok(res) if res.status().is_success() => {
                info!(to = %to, "sms dispatched");
                true
            }
            Ok(res) => {
                error!(status = %res.status(), to = %to, "sms gateway rejected message");
                false
            }
            Err(e) => {
                error!(error = %e, to = %to, "sms dispatch failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_sender_reports_failure() {
        let sms = TwilioSms::new(None);
        assert!(!sms.send("+15550100", "code 123456").await);
    }
}
