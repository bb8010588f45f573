// src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Business-rule failures raised by the service layer. Converted into an
/// [`AppError`] at the handler boundary.
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("Insufficient stock. Available: {available}, Required: {required}")]
    InsufficientStock { available: i64, required: i64 },
    #[error("Source and destination warehouses must be different")]
    InvalidWarehousePair,
    #[error("Document must have at least one line")]
    EmptyDocument,
    #[error("Warehouse code \"{0}\" already exists")]
    DuplicateWarehouseCode(String),
    #[error("SKU \"{0}\" already exists")]
    DuplicateSku(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Validation(String),
    #[error("Cannot validate document in {0} status")]
    NotValidatable(&'static str),
    #[error("Ledger entry is malformed: new stock does not match previous stock plus quantity")]
    MalformedLedgerEntry,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }
}

#[derive(Debug)]
pub enum AppError {
    Unauthorized(String),
    NotFound(String),
    ValidationError(String),
    Conflict(String),
    Internal(String),
}

impl AppError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => {
                tracing::error!(%msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(what) => AppError::not_found(format!("{what} not found")),
            DomainError::DuplicateWarehouseCode(_) | DomainError::DuplicateSku(_) => {
                AppError::conflict(err.to_string())
            }
            DomainError::NotValidatable(_) => AppError::conflict(err.to_string()),
            other => AppError::validation(other.to_string()),
        }
    }
}
