// src/services/otp.rs
//
// Email OTP password-reset flow, mirrored from the hosted-function design:
// a 6-digit code is bcrypt-hashed and stored with a 10-minute expiry, each
// code is single-use, and issuing a new code marks older unused ones used.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::Rng;
use thiserror::Error;

use crate::error::DomainError;
use crate::mailer::Mailer;
use crate::models::otp::OtpRecord;
use crate::store::Store;

const OTP_EXPIRY_MINUTES: i64 = 10;
/// How long after verification a password reset is still accepted.
const RESET_WINDOW_MINUTES: i64 = 30;
const OTP_BCRYPT_COST: u32 = 10;

#[derive(Debug, Error)]
pub enum OtpError {
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("OTP must be a 6-digit number")]
    MalformedOtp,
    #[error("No valid OTP found for this email")]
    NoOtpFound,
    #[error("OTP has expired. Please request a new one.")]
    Expired,
    #[error("Invalid OTP")]
    Mismatch,
    #[error("OTP not verified. Please verify OTP first.")]
    NotVerified,
    #[error("OTP verification expired. Please verify OTP again.")]
    VerificationExpired,
    #[error("No account found with this email address")]
    UserNotFound,
    #[error("Password must be at least 8 characters long")]
    WeakPassword,
    #[error("internal failure: {0}")]
    Internal(String),
    #[error("email delivery failed")]
    Delivery,
}

#[derive(Clone)]
pub struct OtpService {
    store: Store,
    mailer: Arc<dyn Mailer>,
}

impl OtpService {
    pub fn new(store: Store, mailer: Arc<dyn Mailer>) -> Self {
        Self { store, mailer }
    }

    /// Generates, stores and emails a fresh OTP. The record is committed
    /// before delivery is attempted.
    pub async fn send_otp(&self, email: &str) -> Result<(), OtpError> {
        let email = normalize_email(email)?;

        let code = generate_otp();
        let otp_hash = bcrypt::hash(&code, OTP_BCRYPT_COST)
            .map_err(|e| OtpError::Internal(e.to_string()))?;

        let now = Utc::now();
        let record = OtpRecord {
            email: email.clone(),
            otp_hash,
            expires_at: now + Duration::minutes(OTP_EXPIRY_MINUTES),
            used: false,
            created_at: now,
        };

        self.store
            .mutate(|data| {
                // Supersede any outstanding codes for this address.
                for otp in data.otps.iter_mut().filter(|o| o.email == email && !o.used) {
                    otp.used = true;
                }
                data.otps.push(record.clone());
                Ok(())
            })
            .await
            .map_err(domain_to_internal)?;

        tracing::info!(%email, "Generated OTP");

        self.mailer
            .send_otp_email(&email, &code)
            .await
            .map_err(|e| {
                tracing::error!(%email, error = %e, "Failed to send OTP email");
                OtpError::Delivery
            })
    }

    /// Checks the submitted code against the newest unused record and marks
    /// it used on success. An expired record is also marked used.
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<(), OtpError> {
        let email = normalize_email(email)?;
        if otp.len() != 6 || !otp.chars().all(|c| c.is_ascii_digit()) {
            return Err(OtpError::MalformedOtp);
        }

        let candidate = self
            .store
            .read(|data| {
                data.otps
                    .iter()
                    .filter(|o| o.email == email && !o.used)
                    .max_by_key(|o| o.created_at)
                    .cloned()
            })
            .await
            .ok_or(OtpError::NoOtpFound)?;

        if candidate.expires_at < Utc::now() {
            self.mark_used(&email, &candidate).await?;
            return Err(OtpError::Expired);
        }

        let matches = bcrypt::verify(otp, &candidate.otp_hash)
            .map_err(|e| OtpError::Internal(e.to_string()))?;
        if !matches {
            tracing::warn!(%email, "Invalid OTP attempt");
            return Err(OtpError::Mismatch);
        }

        self.mark_used(&email, &candidate).await?;
        tracing::info!(%email, "OTP verified");
        Ok(())
    }

    /// Resets the account password, provided an OTP for this address was
    /// verified within the last 30 minutes.
    pub async fn reset_password(&self, email: &str, new_password: &str) -> Result<(), OtpError> {
        let email = normalize_email(email)?;
        if new_password.len() < 8 {
            return Err(OtpError::WeakPassword);
        }

        let verified = self
            .store
            .read(|data| {
                data.otps
                    .iter()
                    .filter(|o| o.email == email && o.used)
                    .max_by_key(|o| o.created_at)
                    .cloned()
            })
            .await
            .ok_or(OtpError::NotVerified)?;

        if verified.created_at < Utc::now() - Duration::minutes(RESET_WINDOW_MINUTES) {
            return Err(OtpError::VerificationExpired);
        }

        let password_hash = bcrypt::hash(new_password, bcrypt::DEFAULT_COST)
            .map_err(|e| OtpError::Internal(e.to_string()))?;

        self.store
            .mutate(|data| {
                let user = data
                    .users
                    .iter_mut()
                    .find(|u| u.email == email)
                    .ok_or(DomainError::NotFound("User"))?;
                user.password_hash = password_hash.clone();
                Ok(())
            })
            .await
            .map_err(|e| match e {
                DomainError::NotFound(_) => OtpError::UserNotFound,
                other => domain_to_internal(other),
            })?;

        tracing::info!(%email, "Password reset");
        Ok(())
    }

    async fn mark_used(&self, email: &str, record: &OtpRecord) -> Result<(), OtpError> {
        let created_at = record.created_at;
        let email = email.to_string();
        self.store
            .mutate(move |data| {
                if let Some(otp) = data
                    .otps
                    .iter_mut()
                    .find(|o| o.email == email && o.created_at == created_at)
                {
                    otp.used = true;
                }
                Ok(())
            })
            .await
            .map_err(domain_to_internal)
    }
}

fn domain_to_internal(err: DomainError) -> OtpError {
    OtpError::Internal(err.to_string())
}

fn generate_otp() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000u32))
}

/// Lowercased and trimmed; shape check only, no deliverability check.
pub fn normalize_email(email: &str) -> Result<String, OtpError> {
    let email = email.trim().to_lowercase();
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None)
            if !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.') =>
        {
            Ok(email)
        }
        _ => Err(OtpError::InvalidEmail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::mailer::MailerError;

    /// Captures sent codes instead of delivering them.
    struct RecordingMailer {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl RecordingMailer {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn last_code(&self) -> String {
            self.sent.lock().unwrap().last().unwrap().1.clone()
        }
    }

    #[async_trait::async_trait]
    impl Mailer for RecordingMailer {
        async fn send_otp_email(&self, to: &str, code: &str) -> Result<(), MailerError> {
            if self.fail {
                return Err(MailerError::Delivery("boom".to_string()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), code.to_string()));
            Ok(())
        }
    }

    fn service() -> (OtpService, Arc<RecordingMailer>, Store) {
        let store = Store::in_memory();
        let mailer = Arc::new(RecordingMailer::new());
        (
            OtpService::new(store.clone(), mailer.clone()),
            mailer,
            store,
        )
    }

    async fn seed_user(store: &Store, email: &str) {
        let hash = bcrypt::hash("original-pw", 4).unwrap();
        store
            .mutate(|data| {
                data.users.push(crate::models::user::User {
                    id: uuid::Uuid::new_v4(),
                    email: email.to_string(),
                    name: "Test User".to_string(),
                    password_hash: hash.clone(),
                    created_at: Utc::now(),
                });
                Ok(())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn sent_otp_verifies_once_then_is_used_up() {
        let (svc, mailer, _store) = service();
        svc.send_otp("User@Example.com").await.unwrap();
        let code = mailer.last_code();

        svc.verify_otp("user@example.com", &code).await.unwrap();
        let err = svc
            .verify_otp("user@example.com", &code)
            .await
            .unwrap_err();
        assert!(matches!(err, OtpError::NoOtpFound));
    }

    #[tokio::test]
    async fn new_otp_supersedes_the_old_one() {
        let (svc, mailer, _store) = service();
        svc.send_otp("user@example.com").await.unwrap();
        let first = mailer.last_code();
        svc.send_otp("user@example.com").await.unwrap();
        let second = mailer.last_code();

        if first != second {
            assert!(matches!(
                svc.verify_otp("user@example.com", &first).await,
                Err(OtpError::Mismatch)
            ));
        }
        svc.verify_otp("user@example.com", &second).await.unwrap();
    }

    #[tokio::test]
    async fn wrong_code_is_rejected() {
        let (svc, mailer, _store) = service();
        svc.send_otp("user@example.com").await.unwrap();
        let code = mailer.last_code();
        let wrong = if code == "000000" { "000001" } else { "000000" };

        assert!(matches!(
            svc.verify_otp("user@example.com", wrong).await,
            Err(OtpError::Mismatch)
        ));
        // The real code still works: a failed attempt does not consume it.
        svc.verify_otp("user@example.com", &code).await.unwrap();
    }

    #[tokio::test]
    async fn expired_otp_is_rejected_and_consumed() {
        let (svc, mailer, store) = service();
        svc.send_otp("user@example.com").await.unwrap();
        let code = mailer.last_code();

        store
            .mutate(|data| {
                for otp in data.otps.iter_mut() {
                    otp.expires_at = Utc::now() - Duration::minutes(1);
                }
                Ok(())
            })
            .await
            .unwrap();

        assert!(matches!(
            svc.verify_otp("user@example.com", &code).await,
            Err(OtpError::Expired)
        ));
        assert!(matches!(
            svc.verify_otp("user@example.com", &code).await,
            Err(OtpError::NoOtpFound)
        ));
    }

    #[tokio::test]
    async fn reset_requires_recent_verification() {
        let (svc, mailer, store) = service();
        seed_user(&store, "user@example.com").await;

        assert!(matches!(
            svc.reset_password("user@example.com", "new-password").await,
            Err(OtpError::NotVerified)
        ));

        svc.send_otp("user@example.com").await.unwrap();
        svc.verify_otp("user@example.com", &mailer.last_code())
            .await
            .unwrap();
        svc.reset_password("user@example.com", "new-password")
            .await
            .unwrap();

        let hash = store
            .read(|data| data.users[0].password_hash.clone())
            .await;
        assert!(bcrypt::verify("new-password", &hash).unwrap());
    }

    #[tokio::test]
    async fn reset_window_closes_after_thirty_minutes() {
        let (svc, mailer, store) = service();
        seed_user(&store, "user@example.com").await;
        svc.send_otp("user@example.com").await.unwrap();
        svc.verify_otp("user@example.com", &mailer.last_code())
            .await
            .unwrap();

        store
            .mutate(|data| {
                for otp in data.otps.iter_mut() {
                    otp.created_at = Utc::now() - Duration::minutes(31);
                }
                Ok(())
            })
            .await
            .unwrap();

        assert!(matches!(
            svc.reset_password("user@example.com", "new-password").await,
            Err(OtpError::VerificationExpired)
        ));
    }

    #[tokio::test]
    async fn reset_for_unknown_account_is_not_found() {
        let (svc, mailer, _store) = service();
        svc.send_otp("ghost@example.com").await.unwrap();
        svc.verify_otp("ghost@example.com", &mailer.last_code())
            .await
            .unwrap();
        assert!(matches!(
            svc.reset_password("ghost@example.com", "new-password").await,
            Err(OtpError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn delivery_failure_surfaces_but_record_is_kept() {
        let store = Store::in_memory();
        let svc = OtpService::new(store.clone(), Arc::new(RecordingMailer::failing()));
        assert!(matches!(
            svc.send_otp("user@example.com").await,
            Err(OtpError::Delivery)
        ));
        // The record was committed before the send attempt.
        let count = store.read(|data| data.otps.len()).await;
        assert_eq!(count, 1);
    }

    #[test]
    fn email_shapes() {
        assert!(normalize_email("a@b.com").is_ok());
        assert_eq!(normalize_email("  A@B.COM ").unwrap(), "a@b.com");
        assert!(normalize_email("not-an-email").is_err());
        assert!(normalize_email("a@b").is_err());
        assert!(normalize_email("a@b.").is_err());
        assert!(normalize_email("@b.com").is_err());
        assert!(normalize_email("a@b@c.com").is_err());
    }
}
