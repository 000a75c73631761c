//! Rust client for the Vapi voice-call API.
//!
//! Provides outbound call creation (inline assistant definitions rendered
//! from prompt templates, or a pre-configured assistant), call record and
//! status retrieval, and policy-number extraction from completed calls.
//!
//! # Example
//!
//! ```no_run
//! use vapi_client::{CallContext, CallPrompt, VapiClient, VapiConfig};
//!
//! # async fn example() -> Result<(), vapi_client::VapiError> {
//! let config = VapiConfig::new("api-key", "phone-number-id");
//! let client = VapiClient::new(config)?;
//!
//! let prompt = CallPrompt::feedback_survey();
//! let context = CallContext {
//!     name: Some("Jane Doe".to_string()),
//!     policy_number: Some("12345678".to_string()),
//!     ..Default::default()
//! };
//! let call_id = client.create_call("+15551234567", &prompt, &context).await?;
//! println!("placed call {}", call_id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod prompt;
pub mod types;

pub use client::VapiClient;
pub use config::VapiConfig;
pub use error::VapiError;
pub use extract::{extract_policy_number, PolicyNumber};
pub use prompt::{CallContext, CallPrompt};
pub use types::{Call, CallStatus};
