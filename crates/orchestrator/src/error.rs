//! Error types for orchestrator operations.

use thiserror::Error;

/// Errors that can occur during call orchestration.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Store operation failed.
    #[error(transparent)]
    Database(#[from] database::DatabaseError),

    /// Call provider operation failed.
    #[error(transparent)]
    Provider(#[from] vapi_client::VapiError),

    /// The client's phone number cannot be dialed.
    #[error("invalid phone number: {0} (must start with a + country code)")]
    InvalidPhoneNumber(String),
}

/// Result type for orchestrator operations.
pub type Result<T> = std::result::Result<T, OrchestratorError>;
