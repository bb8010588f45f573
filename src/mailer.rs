// src/mailer.rs
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("email delivery failed: {0}")]
    Delivery(String),
}

/// Outbound email seam. Only OTP mail is sent today.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_otp_email(&self, to: &str, code: &str) -> Result<(), MailerError>;
}

/// Sends through an HTTP mail API (`POST MAIL_API_URL` with a bearer key and
/// a `{from, to, subject, text}` JSON body).
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    /// Returns `None` unless `MAIL_API_URL`, `MAIL_API_KEY` and `MAIL_FROM`
    /// are all configured.
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var("MAIL_API_URL").ok()?;
        let api_key = std::env::var("MAIL_API_KEY").ok()?;
        let from = std::env::var("MAIL_FROM").ok()?;
        Some(Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
            from,
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send_otp_email(&self, to: &str, code: &str) -> Result<(), MailerError> {
        let body = serde_json::json!({
            "from": self.from,
            "to": to,
            "subject": "Your OTP Code",
            "text": format!(
                "Your OTP code is: {code}. This code will expire in 10 minutes."
            ),
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| MailerError::Delivery(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MailerError::Delivery(format!(
                "mail API returned {}",
                response.status()
            )));
        }
        tracing::info!(%to, "OTP email sent");
        Ok(())
    }
}

/// Fallback when no mail API is configured: pretends delivery succeeded and
/// logs the fact. The code itself is never logged.
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send_otp_email(&self, to: &str, _code: &str) -> Result<(), MailerError> {
        tracing::warn!(%to, "No mail API configured; OTP email not delivered");
        Ok(())
    }
}
