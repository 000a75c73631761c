//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An insurance client, keyed by policy number.
///
/// This is the read model: the stored password hash is deliberately not part
/// of it, so a client record can be serialized into an API response as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Client {
    /// Policy number (e.g., "12345678"). Globally unique.
    pub policy_number: String,
    /// Full name.
    pub name: String,
    /// Date of birth, ISO 8601 date (e.g., "1990-01-01").
    pub dob: String,
    /// Contact email.
    pub email: String,
    /// Phone number with country code (e.g., "+15551234567").
    pub phone: String,
    /// Optional sex field from signup.
    pub sex: Option<String>,
    /// Client status: "complete", "incomplete", or "active".
    pub status: ClientStatus,
    /// Rolling summary of interactions with this client.
    pub summary: Option<String>,
    /// Most recent feedback text collected for this client.
    pub last_feedback: Option<String>,
    /// When the last feedback was collected (RFC 3339).
    pub last_feedback_date: Option<String>,
}

/// Client record status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ClientStatus {
    Complete,
    Incomplete,
    Active,
}

impl ClientStatus {
    /// The stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Complete => "complete",
            ClientStatus::Incomplete => "incomplete",
            ClientStatus::Active => "active",
        }
    }

    /// Parse a stored or request-supplied status string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "complete" => Some(ClientStatus::Complete),
            "incomplete" => Some(ClientStatus::Incomplete),
            "active" => Some(ClientStatus::Active),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields supplied when a client signs up.
#[derive(Debug, Clone)]
pub struct NewClient {
    pub policy_number: String,
    pub name: String,
    pub dob: String,
    pub email: String,
    pub phone: String,
    pub sex: Option<String>,
    /// Bcrypt hash of the signup password. Never the plaintext.
    pub password_hash: String,
}

/// An employee portal account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Employee {
    /// Login email. Unique.
    pub email: String,
    /// Bcrypt hash of the password.
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// One chat log entry for a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    /// Per-client sequence number, starting at 1.
    pub id: i64,
    /// Message text.
    pub message: String,
    /// Who sent the message.
    pub sender: Sender,
    /// RFC 3339 timestamp.
    pub timestamp: String,
}

/// Chat message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Sender {
    Client,
    Assistant,
    System,
}

impl Sender {
    /// The stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::Client => "client",
            Sender::Assistant => "assistant",
            Sender::System => "system",
        }
    }

    /// Parse a sender supplied by an API caller.
    ///
    /// Only conversation participants are accepted here; "system" entries
    /// are written internally and cannot be injected through the API.
    pub fn parse_participant(s: &str) -> Option<Self> {
        match s {
            "client" => Some(Sender::Client),
            "assistant" => Some(Sender::Assistant),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracking record for one outbound call.
///
/// The status column stores the provider's status string ("initiated",
/// "ringing", "in-progress", ...); typed handling of call statuses lives
/// with the provider client, not in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CallRecord {
    /// Provider-assigned call id. Unique.
    pub call_id: String,
    /// Policy number of the client who was called.
    pub policy_number: String,
    /// When the call was placed (RFC 3339).
    pub call_time: String,
    /// Last known call status.
    pub status: String,
    /// When the status was last polled (RFC 3339).
    pub last_checked: Option<String>,
    /// Free-form notes attached when the call was placed.
    pub notes: Option<String>,
}
