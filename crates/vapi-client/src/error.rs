//! Error types for the Vapi client.

use thiserror::Error;

/// Errors that can occur when interacting with the Vapi API.
#[derive(Debug, Error)]
pub enum VapiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The provider answered with a non-success status.
    ///
    /// A call creation that fails this way was never placed; callers must
    /// not treat it as "placed but unknown".
    #[error("provider unavailable (HTTP {status}): {body}")]
    Unavailable { status: u16, body: String },

    /// Call creation succeeded but the response carried no call id.
    #[error("provider response did not include a call id")]
    MissingCallId,

    /// A pre-configured assistant call was requested without an assistant id.
    #[error("no assistant id configured")]
    MissingAssistantId,
}
