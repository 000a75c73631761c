//! Main orchestrator for the outbound call lifecycle.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use database::{call_record, chatlog, client, CallRecord, Database};
use vapi_client::{CallContext, CallPrompt, CallStatus};

use crate::error::{OrchestratorError, Result};
use crate::history::{self, HistoryEvent};
use crate::monitor::{spawn_monitor, MonitorConfig, MonitorHandle};
use crate::provider::CallProvider;

/// Coordinates the outbound call lifecycle: placing calls, tracking them
/// in the store, and assembling history and analysis views.
pub struct CallOrchestrator<P: CallProvider> {
    db: Database,
    provider: Arc<P>,
    monitor_config: MonitorConfig,
}

impl<P: CallProvider + 'static> CallOrchestrator<P> {
    /// Create a new orchestrator over a store and call provider.
    pub fn new(db: Database, provider: P) -> Self {
        Self {
            db,
            provider: Arc::new(provider),
            monitor_config: MonitorConfig::default(),
        }
    }

    /// Override the monitoring cadence and bounds.
    pub fn with_monitor_config(mut self, config: MonitorConfig) -> Self {
        self.monitor_config = config;
        self
    }

    /// The underlying store.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Place a follow-up call to a client about their feedback.
    ///
    /// Resolves the client, validates the phone number before anything is
    /// sent to the provider, places the call, records it with status
    /// `initiated`, and stores the feedback on the client record.
    ///
    /// Returns the provider-assigned call id.
    pub async fn initiate_follow_up_call(
        &self,
        policy_number: &str,
        feedback: &str,
    ) -> Result<String> {
        let client = client::get_client(self.db.pool(), policy_number).await?;

        if !client.phone.starts_with('+') {
            return Err(OrchestratorError::InvalidPhoneNumber(client.phone));
        }

        let prompt = CallPrompt::feedback_survey();
        let context = CallContext {
            name: Some(client.name.clone()),
            policy_number: Some(client.policy_number.clone()),
            status: Some(client.status.to_string()),
            email: Some(client.email.clone()),
            notes: None,
        }
        .with_notes(format!("Customer feedback to follow up on:\n{}", feedback));

        let call_id = self
            .provider
            .create_call(&client.phone, &prompt, &context)
            .await?;

        let now = Utc::now().to_rfc3339();
        call_record::record_call(
            self.db.pool(),
            &CallRecord {
                call_id: call_id.clone(),
                policy_number: policy_number.to_string(),
                call_time: now.clone(),
                status: CallStatus::Initiated.as_str().to_string(),
                last_checked: None,
                notes: Some(feedback.to_string()),
            },
        )
        .await?;

        client::update_feedback(self.db.pool(), policy_number, feedback, &now).await?;

        info!(
            policy_number = %policy_number,
            call_id = %call_id,
            "Follow-up call placed"
        );
        Ok(call_id)
    }

    /// Start monitoring a placed call in the background.
    pub fn monitor_call(&self, call_id: &str) -> MonitorHandle {
        spawn_monitor(
            self.db.clone(),
            self.provider.clone(),
            call_id.to_string(),
            self.monitor_config.clone(),
        )
    }

    /// The client's merged interaction history, oldest first.
    pub async fn call_history(&self, policy_number: &str) -> Result<Vec<HistoryEvent>> {
        let client = client::get_client(self.db.pool(), policy_number).await?;
        let chatlog = chatlog::get_chatlog(self.db.pool(), policy_number).await?;
        let calls = call_record::list_calls(self.db.pool(), policy_number).await?;

        Ok(history::merge_history(&client, &chatlog, &calls))
    }

    /// Plain-text analysis of the client's most recent call.
    pub async fn call_analysis(&self, policy_number: &str) -> Result<String> {
        // Resolve the client first so an unknown policy is NotFound, not
        // an empty "no calls" report.
        client::get_client(self.db.pool(), policy_number).await?;
        let latest = call_record::latest_call(self.db.pool(), policy_number).await?;

        Ok(history::analysis_text(policy_number, latest.as_ref()))
    }
}
