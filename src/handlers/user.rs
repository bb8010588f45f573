// src/handlers/user.rs
use axum::extract::{Extension, State};
use axum::{http::StatusCode, Json};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::jwt::{sign_token, TOKEN_LIFETIME_SECONDS};
use crate::dtos::user::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::error::{AppError, DomainError};
use crate::middleware::auth::AuthContext;
use crate::models::user::User;
use crate::services::otp::normalize_email;
use crate::state::AppState;
use tracing::instrument;

#[instrument(skip(state, payload))]
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let email = normalize_email(&payload.email)
        .map_err(|_| AppError::validation("Invalid email format"))?;
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Name required"));
    }
    if payload.password.len() < 8 {
        return Err(AppError::validation(
            "Password must be at least 8 characters long",
        ));
    }

    let password_hash = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    let user = state
        .store
        .mutate(|data| {
            if data.users.iter().any(|u| u.email == email) {
                return Err(DomainError::validation("Email already registered"));
            }
            let user = User {
                id: Uuid::new_v4(),
                email: email.clone(),
                name: payload.name.trim().to_string(),
                password_hash: password_hash.clone(),
                created_at: Utc::now(),
            };
            data.users.push(user.clone());
            Ok(user)
        })
        .await
        .map_err(|e| match e {
            DomainError::Validation(msg) => AppError::conflict(msg),
            other => other.into(),
        })?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[instrument(skip(state, payload))]
pub async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError::validation("Email required"));
    }
    if payload.password.is_empty() {
        return Err(AppError::validation("Password required"));
    }
    let email = payload.email.trim().to_lowercase();

    let user = state
        .store
        .read(|data| data.users.iter().find(|u| u.email == email).cloned())
        .await
        .ok_or_else(|| AppError::not_found("Invalid credentials"))?;

    let ok = verify(&payload.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;
    if !ok {
        return Err(AppError::validation("Invalid credentials"));
    }

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::internal("JWT secret not configured"))?;
    let token = sign_token(user.id, &user.email, &user.name, &secret)?;

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer",
        expires_in_seconds: TOKEN_LIFETIME_SECONDS,
    }))
}

// Authenticated endpoint: returns the profile for the id in AuthContext
#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .store
        .read(|data| data.users.iter().find(|u| u.id == auth.user_id).cloned())
        .await
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(UserResponse::from(user)))
}
