//! Error types and status-code mapping for the portal API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use database::DatabaseError;
use orchestrator::OrchestratorError;

/// Errors that can occur in the portal API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Store operation failed.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Call orchestration failed.
    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),

    /// Password hashing failed.
    #[error("password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// Malformed or missing request fields.
    #[error("{0}")]
    BadRequest(String),

    /// Credentials did not check out.
    #[error("{0}")]
    Unauthorized(String),
}

impl ApiError {
    /// Map the error taxonomy onto a status code and client-facing message.
    ///
    /// Internal failures get a generic message; the detail is logged, not
    /// returned.
    pub fn response_parts(&self) -> (StatusCode, String) {
        match self {
            ApiError::Database(err) => database_parts(err),
            ApiError::Orchestrator(err) => match err {
                OrchestratorError::Database(db_err) => database_parts(db_err),
                OrchestratorError::InvalidPhoneNumber(_) => (
                    StatusCode::BAD_REQUEST,
                    "Client phone number must start with a + country code".to_string(),
                ),
                OrchestratorError::Provider(provider_err) => {
                    tracing::error!("Call provider error: {}", provider_err);
                    (
                        StatusCode::BAD_GATEWAY,
                        "Call provider unavailable".to_string(),
                    )
                }
            },
            ApiError::Hash(err) => {
                tracing::error!("Password hashing error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
        }
    }
}

fn database_parts(err: &DatabaseError) -> (StatusCode, String) {
    match err {
        DatabaseError::NotFound { entity, .. } => {
            let message = match *entity {
                "Client" => "Customer not found",
                "Employee" => "User not found",
                "CallRecord" => "Call record not found",
                _ => "Not found",
            };
            (StatusCode::NOT_FOUND, message.to_string())
        }
        DatabaseError::AlreadyExists { entity, .. } => {
            let message = match *entity {
                "Client" => "Policy number already exists",
                "Employee" => "User already exists",
                _ => "Already exists",
            };
            (StatusCode::CONFLICT, message.to_string())
        }
        DatabaseError::DuplicateIdentity { .. } => (
            StatusCode::CONFLICT,
            "User with this name, email, and DOB already exists".to_string(),
        ),
        DatabaseError::Sqlx(_) | DatabaseError::Migration(_) => {
            tracing::error!("Database error: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.response_parts();

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for portal API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
