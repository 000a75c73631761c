//! Policy number extraction from call records.
//!
//! A completed call can carry the customer's policy number in several
//! places depending on how the conversation went; extraction tries each
//! location in a fixed priority order and falls back to scanning the raw
//! transcript.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::types::Call;

/// Transcript phrases that introduce a policy number, in priority order.
/// Each captures the run of digits (possibly spoken digit-by-digit, so
/// spaces are allowed) that follows.
static TRANSCRIPT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)insurance number is\s+([0-9\s]+)",
        r"(?i)policy number is\s+([0-9\s]+)",
        r"(?i)policy number\s+([0-9\s]+)",
        r"(?i)insurance number\s+([0-9\s]+)",
        r"(?i)my number is\s+([0-9\s]+)",
        r"(?i)my policy is\s+([0-9\s]+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("static pattern compiles"))
    .collect()
});

/// Result of extracting a policy number from a call record.
///
/// `Unknown` is the canonical "nothing found" value; callers must never
/// treat it as a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyNumber {
    Found(String),
    Unknown,
}

impl PolicyNumber {
    /// The extracted number, or `None` when unknown.
    pub fn found(&self) -> Option<&str> {
        match self {
            PolicyNumber::Found(n) => Some(n),
            PolicyNumber::Unknown => None,
        }
    }

    /// Whether extraction found nothing.
    pub fn is_unknown(&self) -> bool {
        matches!(self, PolicyNumber::Unknown)
    }
}

impl std::fmt::Display for PolicyNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyNumber::Found(n) => f.write_str(n),
            PolicyNumber::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Extract the customer's policy number from a call record.
///
/// Strategies are tried in order, first match wins:
/// 1. The provider's structured analysis field `policy_number`.
/// 2. Arguments of a `confirmUser` tool invocation in the message log.
/// 3. Transcript phrases like "policy number is 1 2 3 4 5 6 7 8".
pub fn extract_policy_number(call: &Call) -> PolicyNumber {
    if let Some(number) = from_structured_data(call) {
        return PolicyNumber::Found(number);
    }

    if let Some(number) = from_tool_calls(call) {
        return PolicyNumber::Found(number);
    }

    if let Some(number) = from_transcript(call) {
        return PolicyNumber::Found(number);
    }

    PolicyNumber::Unknown
}

/// Strategy 1: the provider's own structured analysis.
fn from_structured_data(call: &Call) -> Option<String> {
    let structured = call.analysis.as_ref()?.structured_data.as_ref()?;
    policy_value(structured.get("policy_number")?)
}

/// Strategy 2: arguments of a `confirmUser` tool invocation.
fn from_tool_calls(call: &Call) -> Option<String> {
    for message in &call.messages {
        if message.role.as_deref() != Some("tool_calls") {
            continue;
        }
        for tool_call in &message.tool_calls {
            if tool_call.call_type.as_deref() != Some("function") {
                continue;
            }
            let Some(function) = &tool_call.function else {
                continue;
            };
            if function.name != "confirmUser" {
                continue;
            }
            // A malformed argument payload means this strategy doesn't
            // match, not that extraction failed.
            let Ok(args) = serde_json::from_str::<Value>(&function.arguments) else {
                continue;
            };
            if let Some(number) = args.get("policy_number").and_then(policy_value) {
                return Some(number);
            }
        }
    }
    None
}

/// Strategy 3: scan the transcript for known phrasings.
fn from_transcript(call: &Call) -> Option<String> {
    let transcript = call.transcript.as_deref()?;

    for pattern in TRANSCRIPT_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(transcript) {
            let digits: String = captures[1]
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            if !digits.is_empty() {
                return Some(digits);
            }
        }
    }
    None
}

/// A policy number value from a JSON payload: a non-empty string, or a
/// bare number the provider failed to quote.
fn policy_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
