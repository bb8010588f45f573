// src/models/otp.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One password-reset code. The code itself is never stored, only its
/// bcrypt hash. Superseded codes are marked used when a new one is issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtpRecord {
    pub email: String,
    pub otp_hash: String,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}
