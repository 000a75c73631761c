//! Vapi HTTP client.

use std::time::Duration;

use chrono::DateTime;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::VapiConfig;
use crate::error::VapiError;
use crate::extract::extract_policy_number;
use crate::prompt::{CallContext, CallPrompt};
use crate::types::{Call, CallStatus, CreateCallRequest, CreatedCall};

/// How many calls to fetch when scanning for the most recent one. The
/// provider's list ordering is not contractual, so a window is fetched
/// and ordered locally by creation time.
const RECENCY_WINDOW: usize = 25;

/// Client for the Vapi voice-call API.
#[derive(Clone)]
pub struct VapiClient {
    http: Client,
    config: VapiConfig,
}

impl VapiClient {
    /// Create a new client.
    pub fn new(config: VapiConfig) -> Result<Self, VapiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(VapiError::Http)?;

        Ok(Self { http, config })
    }

    /// Place an outbound call with an inline assistant rendered from a
    /// prompt template and customer context.
    ///
    /// Returns the provider-assigned call id. On a non-success response
    /// the call was never placed.
    pub async fn create_call(
        &self,
        customer_number: &str,
        prompt: &CallPrompt,
        context: &CallContext,
    ) -> Result<String, VapiError> {
        let request = CreateCallRequest::from_prompt(
            &self.config.phone_number_id,
            customer_number,
            prompt,
            context,
        );
        self.place(request).await
    }

    /// Place an outbound call using the pre-configured assistant.
    pub async fn create_assistant_call(&self, customer_number: &str) -> Result<String, VapiError> {
        let assistant_id = self
            .config
            .assistant_id
            .as_deref()
            .ok_or(VapiError::MissingAssistantId)?;

        let request = CreateCallRequest::from_assistant_id(
            &self.config.phone_number_id,
            customer_number,
            assistant_id,
        );
        self.place(request).await
    }

    async fn place(&self, request: CreateCallRequest) -> Result<String, VapiError> {
        debug!(number = %request.customer.number, "Creating outbound call");

        let response = self
            .http
            .post(self.config.call_phone_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(VapiError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Call creation rejected by provider");
            return Err(VapiError::Unavailable {
                status: status.as_u16(),
                body,
            });
        }

        let created: CreatedCall = response.json().await.map_err(VapiError::Http)?;
        let call_id = created.id.ok_or(VapiError::MissingCallId)?;

        info!(call_id = %call_id, "Outbound call created");
        Ok(call_id)
    }

    /// Fetch a specific call record.
    pub async fn get_call(&self, call_id: &str) -> Result<Call, VapiError> {
        let response = self
            .http
            .get(self.config.call_url(call_id))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(VapiError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VapiError::Unavailable {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await.map_err(VapiError::Http)?)
    }

    /// Fetch the current status of a call.
    ///
    /// A missing or unrecognized status maps to `CallStatus::Unknown`;
    /// only transport and provider failures are errors.
    pub async fn call_status(&self, call_id: &str) -> Result<CallStatus, VapiError> {
        let call = self.get_call(call_id).await?;
        let status = call.status();
        debug!(call_id = %call_id, status = %status, "Polled call status");
        Ok(status)
    }

    /// Fetch up to `limit` recent calls, most recently created first.
    ///
    /// Ordering is applied locally from each call's `createdAt` field
    /// rather than trusting the provider's response order.
    pub async fn list_recent_calls(&self, limit: usize) -> Result<Vec<Call>, VapiError> {
        let response = self
            .http
            .get(self.config.calls_url())
            .bearer_auth(&self.config.api_key)
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(VapiError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VapiError::Unavailable {
                status: status.as_u16(),
                body,
            });
        }

        let mut calls: Vec<Call> = response.json().await.map_err(VapiError::Http)?;
        sort_by_created_desc(&mut calls);
        Ok(calls)
    }

    /// Fetch the most recently created call, if any.
    pub async fn latest_call(&self) -> Result<Option<Call>, VapiError> {
        let calls = self.list_recent_calls(RECENCY_WINDOW).await?;
        Ok(calls.into_iter().next())
    }

    /// Scan recent calls for the first whose extracted policy number
    /// matches.
    pub async fn find_call_by_policy(
        &self,
        policy_number: &str,
    ) -> Result<Option<Call>, VapiError> {
        let calls = self.list_recent_calls(RECENCY_WINDOW).await?;

        let wanted = policy_number.trim();
        Ok(calls.into_iter().find(|call| {
            extract_policy_number(call)
                .found()
                .is_some_and(|extracted| extracted == wanted)
        }))
    }

    /// Get the configuration.
    pub fn config(&self) -> &VapiConfig {
        &self.config
    }
}

/// Order calls newest-first by their `createdAt` timestamp. Calls without
/// a parseable timestamp sort last.
fn sort_by_created_desc(calls: &mut [Call]) {
    calls.sort_by(|a, b| {
        let a_time = parse_created(a);
        let b_time = parse_created(b);
        b_time.cmp(&a_time)
    });
}

fn parse_created(call: &Call) -> Option<DateTime<chrono::FixedOffset>> {
    call.created_at
        .as_deref()
        .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
}

impl std::fmt::Debug for VapiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VapiClient")
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call_created_at(id: &str, created_at: Option<&str>) -> Call {
        Call {
            id: id.to_string(),
            created_at: created_at.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_sort_by_created_desc() {
        let mut calls = vec![
            call_created_at("old", Some("2026-08-01T10:00:00Z")),
            call_created_at("new", Some("2026-08-02T09:00:00Z")),
            call_created_at("mid", Some("2026-08-01T18:00:00Z")),
        ];

        sort_by_created_desc(&mut calls);

        let ids: Vec<&str> = calls.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_sort_puts_unparseable_timestamps_last() {
        let mut calls = vec![
            call_created_at("missing", None),
            call_created_at("dated", Some("2026-08-01T10:00:00Z")),
        ];

        sort_by_created_desc(&mut calls);

        assert_eq!(calls[0].id, "dated");
        assert_eq!(calls[1].id, "missing");
    }

    #[tokio::test]
    async fn test_assistant_call_requires_configured_id() {
        let client = VapiClient::new(VapiConfig::new("key", "phone-1")).unwrap();

        let result = client.create_assistant_call("+15551234567").await;
        assert!(matches!(result, Err(VapiError::MissingAssistantId)));
    }
}
