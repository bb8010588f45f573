// src/handlers/otp.rs
use axum::extract::State;
use axum::{http::StatusCode, Json};
use tracing::instrument;

use crate::dtos::otp::{OtpResponse, ResetPasswordRequest, SendOtpRequest, VerifyOtpRequest};
use crate::services::otp::OtpError;
use crate::state::AppState;

// The OTP endpoints keep their own `{success, message|error}` body instead
// of the shared `{"error"}` shape, so they map errors to responses here
// rather than going through AppError.
fn otp_failure(err: OtpError) -> (StatusCode, Json<OtpResponse>) {
    let status = match &err {
        OtpError::NoOtpFound | OtpError::UserNotFound => StatusCode::NOT_FOUND,
        OtpError::InvalidEmail
        | OtpError::MalformedOtp
        | OtpError::Expired
        | OtpError::Mismatch
        | OtpError::NotVerified
        | OtpError::VerificationExpired
        | OtpError::WeakPassword => StatusCode::BAD_REQUEST,
        OtpError::Internal(msg) => {
            tracing::error!(%msg, "otp internal error");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(OtpResponse::err("Internal server error")),
            );
        }
        OtpError::Delivery => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(OtpResponse::err(
                    "Failed to send OTP. Please try again later.",
                )),
            );
        }
    };
    (status, Json(OtpResponse::err(err.to_string())))
}

#[instrument(skip(state, payload))]
pub async fn send_otp(
    State(state): State<AppState>,
    Json(payload): Json<SendOtpRequest>,
) -> (StatusCode, Json<OtpResponse>) {
    match state.otp.send_otp(&payload.email).await {
        Ok(()) => (
            StatusCode::OK,
            Json(OtpResponse::ok("OTP sent successfully to your email")),
        ),
        Err(e) => otp_failure(e),
    }
}

#[instrument(skip(state, payload))]
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(payload): Json<VerifyOtpRequest>,
) -> (StatusCode, Json<OtpResponse>) {
    match state.otp.verify_otp(&payload.email, &payload.otp).await {
        Ok(()) => (
            StatusCode::OK,
            Json(OtpResponse::ok("OTP verified successfully")),
        ),
        Err(e) => otp_failure(e),
    }
}

#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> (StatusCode, Json<OtpResponse>) {
    match state
        .otp
        .reset_password(&payload.email, &payload.new_password)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(OtpResponse::ok("Password updated successfully")),
        ),
        Err(e) => otp_failure(e),
    }
}
