//! Bounded, cancellable call status monitoring.
//!
//! Status polling runs as a spawned task rather than blocking the caller
//! for the duration of the call. The task ends when the call reaches a
//! terminal status, the maximum wait elapses, or the provider stops
//! answering.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{info, warn};

use database::{call_record, client, ClientStatus, Database};
use vapi_client::{extract_policy_number, CallStatus};

use crate::provider::CallProvider;

/// Consecutive poll failures after which the monitor gives up.
const MAX_CONSECUTIVE_FAILURES: u32 = 5;

/// Monitoring cadence and bounds.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Delay between status polls.
    pub poll_interval: Duration,
    /// Maximum total time to keep polling a single call.
    pub max_wait: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            max_wait: Duration::from_secs(600),
        }
    }
}

/// How a monitoring task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorOutcome {
    /// The call reached a terminal status.
    Terminal(CallStatus),
    /// The maximum wait elapsed before the call ended.
    TimedOut { last_status: CallStatus },
    /// Polling was abandoned after repeated provider failures.
    ProviderLost,
}

/// Handle to a running status monitor.
///
/// Dropping the handle detaches the task; it keeps polling until it ends
/// on its own.
#[derive(Debug)]
pub struct MonitorHandle {
    join: JoinHandle<MonitorOutcome>,
}

impl MonitorHandle {
    /// Stop polling.
    ///
    /// This is a local cancellation only: the call itself is not cancelled
    /// at the provider and may keep running.
    pub fn cancel(&self) {
        self.join.abort();
    }

    /// Whether the monitoring task has ended.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the monitoring task to end.
    ///
    /// Returns `None` if the task was cancelled.
    pub async fn join(self) -> Option<MonitorOutcome> {
        self.join.await.ok()
    }
}

/// Spawn a status monitor for a call.
///
/// Each poll writes the observed status and check time through the store.
pub(crate) fn spawn_monitor<P: CallProvider + 'static>(
    db: Database,
    provider: Arc<P>,
    call_id: String,
    config: MonitorConfig,
) -> MonitorHandle {
    let join = tokio::spawn(async move {
        let deadline = Instant::now() + config.max_wait;
        let mut consecutive_failures = 0u32;
        let mut last_status = CallStatus::Unknown;

        loop {
            match provider.call_status(&call_id).await {
                Ok(status) => {
                    consecutive_failures = 0;
                    last_status = status;

                    let checked_at = Utc::now().to_rfc3339();
                    if let Err(e) = call_record::update_call_status(
                        db.pool(),
                        &call_id,
                        status.as_str(),
                        &checked_at,
                    )
                    .await
                    {
                        warn!(call_id = %call_id, error = %e, "Failed to persist call status");
                    }

                    if status.is_terminal() {
                        info!(call_id = %call_id, status = %status, "Call ended");
                        if matches!(status, CallStatus::Completed | CallStatus::Ended) {
                            reconcile(&db, provider.as_ref(), &call_id).await;
                        }
                        return MonitorOutcome::Terminal(status);
                    }
                }
                Err(e) => {
                    consecutive_failures += 1;
                    warn!(
                        call_id = %call_id,
                        error = %e,
                        failures = consecutive_failures,
                        "Status poll failed"
                    );
                    if consecutive_failures >= MAX_CONSECUTIVE_FAILURES {
                        return MonitorOutcome::ProviderLost;
                    }
                }
            }

            if Instant::now() + config.poll_interval >= deadline {
                warn!(call_id = %call_id, "Gave up waiting for call to end");
                return MonitorOutcome::TimedOut { last_status };
            }
            tokio::time::sleep(config.poll_interval).await;
        }
    });

    MonitorHandle { join }
}

/// Confirm the customer's identity from the finished call and fold the
/// provider's analysis back into the client record.
///
/// The extracted policy number must match the one the call was placed
/// for; on a match the client is marked complete and any provider-side
/// summary is stored. Mismatches and extraction misses are logged, never
/// fatal.
async fn reconcile<P: CallProvider + ?Sized>(db: &Database, provider: &P, call_id: &str) {
    let call = match provider.get_call(call_id).await {
        Ok(call) => call,
        Err(e) => {
            warn!(call_id = %call_id, error = %e, "Could not fetch finished call");
            return;
        }
    };

    let record = match call_record::get_call(db.pool(), call_id).await {
        Ok(record) => record,
        Err(e) => {
            warn!(call_id = %call_id, error = %e, "No tracking record for finished call");
            return;
        }
    };

    let extracted = extract_policy_number(&call);
    match extracted.found() {
        Some(number) if number == record.policy_number => {
            info!(
                call_id = %call_id,
                policy_number = %number,
                "Identity confirmed from call"
            );

            if let Some(summary) = call.analysis.as_ref().and_then(|a| a.summary.as_deref()) {
                if let Err(e) =
                    client::update_summary(db.pool(), &record.policy_number, summary).await
                {
                    warn!(call_id = %call_id, error = %e, "Failed to store call summary");
                }
            }
            if let Err(e) =
                client::update_status(db.pool(), &record.policy_number, ClientStatus::Complete)
                    .await
            {
                warn!(call_id = %call_id, error = %e, "Failed to update client status");
            }
        }
        Some(number) => {
            warn!(
                call_id = %call_id,
                expected = %record.policy_number,
                extracted = %number,
                "Call transcript names a different policy number"
            );
        }
        None => {
            info!(call_id = %call_id, "No policy number found in finished call");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_client, MockProvider};
    use database::CallRecord;

    fn fast_config() -> MonitorConfig {
        MonitorConfig {
            poll_interval: Duration::from_millis(10),
            max_wait: Duration::from_millis(200),
        }
    }

    async fn seed_call(db: &Database, call_id: &str) {
        seed_client(db, "12345678", "+15551234567").await;
        call_record::record_call(
            db.pool(),
            &CallRecord {
                call_id: call_id.to_string(),
                policy_number: "12345678".to_string(),
                call_time: "2026-08-01T10:00:00+00:00".to_string(),
                status: "initiated".to_string(),
                last_checked: None,
                notes: None,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_monitor_stops_on_terminal_status() {
        let db = crate::test_support::test_db().await;
        seed_call(&db, "call-1").await;

        let provider = Arc::new(MockProvider::with_statuses(vec![
            CallStatus::Ringing,
            CallStatus::InProgress,
            CallStatus::Completed,
        ]));

        let handle = spawn_monitor(db.clone(), provider, "call-1".to_string(), fast_config());
        let outcome = handle.join().await.unwrap();

        assert_eq!(outcome, MonitorOutcome::Terminal(CallStatus::Completed));

        let record = call_record::latest_call(db.pool(), "12345678")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.status, "completed");
        assert!(record.last_checked.is_some());
    }

    #[tokio::test]
    async fn test_monitor_times_out() {
        let db = crate::test_support::test_db().await;
        seed_call(&db, "call-1").await;

        // Never reaches a terminal status.
        let provider = Arc::new(MockProvider::with_statuses(vec![CallStatus::InProgress]));

        let handle = spawn_monitor(db.clone(), provider, "call-1".to_string(), fast_config());
        let outcome = handle.join().await.unwrap();

        assert_eq!(
            outcome,
            MonitorOutcome::TimedOut {
                last_status: CallStatus::InProgress
            }
        );
    }

    #[tokio::test]
    async fn test_monitor_gives_up_on_provider_failures() {
        let db = crate::test_support::test_db().await;
        seed_call(&db, "call-1").await;

        let provider = Arc::new(MockProvider::failing());

        let config = MonitorConfig {
            poll_interval: Duration::from_millis(1),
            max_wait: Duration::from_secs(5),
        };
        let handle = spawn_monitor(db.clone(), provider, "call-1".to_string(), config);
        let outcome = handle.join().await.unwrap();

        assert_eq!(outcome, MonitorOutcome::ProviderLost);
    }

    #[tokio::test]
    async fn test_reconciliation_confirms_identity_and_stores_summary() {
        let db = crate::test_support::test_db().await;
        seed_call(&db, "call-1").await;

        let finished_call = vapi_client::Call {
            id: "call-1".to_string(),
            status: Some(CallStatus::Completed),
            analysis: Some(vapi_client::types::Analysis {
                structured_data: Some(serde_json::json!({ "policy_number": "12345678" })),
                summary: Some("Customer confirmed their claim details.".to_string()),
            }),
            ..Default::default()
        };
        let provider = Arc::new(
            MockProvider::with_statuses(vec![CallStatus::Completed]).with_call(finished_call),
        );

        let handle = spawn_monitor(db.clone(), provider, "call-1".to_string(), fast_config());
        let outcome = handle.join().await.unwrap();
        assert_eq!(outcome, MonitorOutcome::Terminal(CallStatus::Completed));

        let stored = client::get_client(db.pool(), "12345678").await.unwrap();
        assert_eq!(stored.status, ClientStatus::Complete);
        assert_eq!(
            stored.summary.as_deref(),
            Some("Customer confirmed their claim details.")
        );
    }

    #[tokio::test]
    async fn test_reconciliation_ignores_mismatched_policy_number() {
        let db = crate::test_support::test_db().await;
        seed_call(&db, "call-1").await;

        let finished_call = vapi_client::Call {
            id: "call-1".to_string(),
            status: Some(CallStatus::Completed),
            transcript: Some("my policy number is 9 9 9 9 9 9 9 9".to_string()),
            ..Default::default()
        };
        let provider = Arc::new(
            MockProvider::with_statuses(vec![CallStatus::Completed]).with_call(finished_call),
        );

        let handle = spawn_monitor(db.clone(), provider, "call-1".to_string(), fast_config());
        handle.join().await.unwrap();

        // The caller did not confirm this policy; the client record is
        // left untouched.
        let stored = client::get_client(db.pool(), "12345678").await.unwrap();
        assert_eq!(stored.status, ClientStatus::Active);
        assert!(stored.summary.is_none());
    }

    #[tokio::test]
    async fn test_cancel_is_local_only() {
        let db = crate::test_support::test_db().await;
        seed_call(&db, "call-1").await;

        let provider = Arc::new(MockProvider::with_statuses(vec![CallStatus::InProgress]));

        let handle = spawn_monitor(
            db.clone(),
            provider.clone(),
            "call-1".to_string(),
            MonitorConfig {
                poll_interval: Duration::from_millis(10),
                max_wait: Duration::from_secs(60),
            },
        );

        handle.cancel();
        assert!(handle.join().await.is_none());

        // Cancellation stops our polling; nothing tells the provider to
        // hang up, the call keeps running remotely.
        let polls_after_cancel = provider.status_polls();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(provider.status_polls(), polls_after_cancel);
    }
}
