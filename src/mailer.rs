use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{error, info};

use crate::config::SmtpConfig;

/// Outbound email capability. Dispatch failures are reported as `false`,
/// never as errors.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body_html: &str) -> bool;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let creds = Credentials::new(config.username.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .port(config.port)
            .credentials(creds)
            .build();
        Ok(Self {
            transport,
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body_html: &str) -> bool {
        let from = match self.from.parse::<Mailbox>() {
            Ok(m) => m,
            Err(e) => {
                error!(error = %e, from = %self.from, "invalid sender address");
                return false;
            }
        };
        let recipient = match to.parse::<Mailbox>() {
            Ok(m) => m,
            Err(e) => {
                error!(error = %e, to = %to, "invalid recipient address");
                return false;
            }
        };

        let message = match Message::builder()
            .from(from)
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body_html.to_string())
        {
            Ok(m) => m,
            Err(e) => {
                error!(error = %e, "failed to build email");
                return false;
            }
        };

        match self.transport.send(message).await {
            Ok(_) => {
                info!(to = %to, "email dispatched");
                true
            }
            Err(e) => {
                error!(error = %e, to = %to, "email dispatch failed");
                false
            }
        }
    }
}
