//! Wire types for the Vapi API.

use serde::{Deserialize, Serialize};

use crate::prompt::{CallContext, CallPrompt};

/// Status of a voice call.
///
/// Deserialization never fails: any status string this client does not
/// recognize maps to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStatus {
    Initiated,
    Ringing,
    InProgress,
    Completed,
    Failed,
    Canceled,
    Ended,
    Unknown,
}

impl CallStatus {
    /// Whether no further status transitions can occur.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CallStatus::Completed | CallStatus::Failed | CallStatus::Canceled | CallStatus::Ended
        )
    }

    /// The wire string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Initiated => "initiated",
            CallStatus::Ringing => "ringing",
            CallStatus::InProgress => "in-progress",
            CallStatus::Completed => "completed",
            CallStatus::Failed => "failed",
            CallStatus::Canceled => "canceled",
            CallStatus::Ended => "ended",
            CallStatus::Unknown => "unknown",
        }
    }

    /// Parse a status string, mapping anything unrecognized to `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s {
            "initiated" => CallStatus::Initiated,
            "ringing" => CallStatus::Ringing,
            "in-progress" => CallStatus::InProgress,
            "completed" => CallStatus::Completed,
            "failed" => CallStatus::Failed,
            "canceled" => CallStatus::Canceled,
            "ended" => CallStatus::Ended,
            _ => CallStatus::Unknown,
        }
    }
}

impl std::fmt::Display for CallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CallStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CallStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let status = String::deserialize(deserializer)?;
        Ok(CallStatus::parse(&status))
    }
}

/// A call record as returned by the provider.
///
/// Only the fields this system mines are modeled; the provider record
/// carries many more (cost breakdowns, recordings, transport details)
/// which are ignored on deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    /// Provider-assigned call id.
    pub id: String,
    /// Current status, if the provider reported one.
    #[serde(default)]
    pub status: Option<CallStatus>,
    /// Full conversation transcript, once available.
    #[serde(default)]
    pub transcript: Option<String>,
    /// Provider-side analysis of the call.
    #[serde(default)]
    pub analysis: Option<Analysis>,
    /// Conversation messages, including tool invocations.
    #[serde(default)]
    pub messages: Vec<CallMessage>,
    /// When the call started (RFC 3339).
    #[serde(default)]
    pub started_at: Option<String>,
    /// When the call ended (RFC 3339).
    #[serde(default)]
    pub ended_at: Option<String>,
    /// When the call object was created (RFC 3339).
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Call {
    /// The call's status, with a missing field mapped to `Unknown`.
    pub fn status(&self) -> CallStatus {
        self.status.unwrap_or(CallStatus::Unknown)
    }
}

/// Provider-side analysis attached to a completed call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Key/value fields the provider's NLU extracted from the call.
    #[serde(default)]
    pub structured_data: Option<serde_json::Value>,
    /// Natural-language summary of the call.
    #[serde(default)]
    pub summary: Option<String>,
}

/// One message in a call's conversation log.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallMessage {
    /// Message role ("bot", "user", "tool_calls", ...).
    #[serde(default)]
    pub role: Option<String>,
    /// Message text, when the role carries one.
    #[serde(default)]
    pub message: Option<String>,
    /// Tool invocations, when the role is "tool_calls".
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}

/// A tool invocation embedded in a call message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCall {
    /// Invocation type; function calls use "function".
    #[serde(rename = "type", default)]
    pub call_type: Option<String>,
    /// The invoked function, for function-type calls.
    #[serde(default)]
    pub function: Option<ToolFunction>,
}

/// The function part of a tool invocation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolFunction {
    /// Function name (e.g., "confirmUser").
    pub name: String,
    /// Argument payload as a JSON-encoded string.
    #[serde(default)]
    pub arguments: String,
}

/// Request body for creating an outbound phone call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCallRequest {
    /// Inline assistant definition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistant: Option<AssistantSpec>,
    /// Pre-configured assistant id, used instead of an inline definition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistant_id: Option<String>,
    /// Phone number id to place the call from.
    pub phone_number_id: String,
    /// Who to call.
    pub customer: Customer,
}

impl CreateCallRequest {
    /// Build a request with an inline assistant rendered from a prompt
    /// template and customer context.
    pub fn from_prompt(
        phone_number_id: impl Into<String>,
        customer_number: impl Into<String>,
        prompt: &CallPrompt,
        context: &CallContext,
    ) -> Self {
        Self {
            assistant: Some(AssistantSpec::render(prompt, context)),
            assistant_id: None,
            phone_number_id: phone_number_id.into(),
            customer: Customer {
                number: customer_number.into(),
            },
        }
    }

    /// Build a request using a pre-configured assistant.
    pub fn from_assistant_id(
        phone_number_id: impl Into<String>,
        customer_number: impl Into<String>,
        assistant_id: impl Into<String>,
    ) -> Self {
        Self {
            assistant: None,
            assistant_id: Some(assistant_id.into()),
            phone_number_id: phone_number_id.into(),
            customer: Customer {
                number: customer_number.into(),
            },
        }
    }
}

/// Inline assistant definition for a call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantSpec {
    /// What the assistant says when the call connects.
    pub first_message: String,
    /// Language model configuration.
    pub model: ModelSpec,
    /// Voice model name.
    pub voice: String,
}

impl AssistantSpec {
    /// Render a prompt template with customer context into an assistant
    /// definition.
    pub fn render(prompt: &CallPrompt, context: &CallContext) -> Self {
        Self {
            first_message: prompt.first_message.clone(),
            model: ModelSpec {
                provider: crate::prompt::MODEL_PROVIDER.to_string(),
                model: crate::prompt::MODEL_NAME.to_string(),
                messages: vec![SystemMessage {
                    role: "system".to_string(),
                    content: context.render_system_prompt(prompt),
                }],
            },
            voice: prompt.voice.clone(),
        }
    }
}

/// Language model configuration for an inline assistant.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSpec {
    pub provider: String,
    pub model: String,
    pub messages: Vec<SystemMessage>,
}

/// System message seeding the assistant's conversation.
#[derive(Debug, Clone, Serialize)]
pub struct SystemMessage {
    pub role: String,
    pub content: String,
}

/// Customer details for an outbound call.
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    /// Phone number with country code.
    pub number: String,
}

/// Response body from call creation.
#[derive(Debug, Deserialize)]
pub struct CreatedCall {
    #[serde(default)]
    pub id: Option<String>,
}
