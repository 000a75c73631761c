//! Outbound call lifecycle orchestration for the Ready Set Insure portal.
//!
//! Composes the persistence layer and the voice-call provider client:
//! placing follow-up calls, tracking call status with a bounded background
//! monitor, and assembling per-client history and analysis views.

pub mod error;
pub mod history;
pub mod monitor;
pub mod orchestrator;
pub mod provider;

pub use error::{OrchestratorError, Result};
pub use history::{HistoryEvent, HistoryEventKind};
pub use monitor::{MonitorConfig, MonitorHandle, MonitorOutcome};
pub use orchestrator::CallOrchestrator;
pub use provider::CallProvider;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use database::{client, Database, NewClient};
    use vapi_client::{Call, CallContext, CallPrompt, CallStatus, VapiError};

    use crate::provider::CallProvider;

    pub async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    pub async fn seed_client(db: &Database, policy_number: &str, phone: &str) {
        client::create_client(
            db.pool(),
            &NewClient {
                policy_number: policy_number.to_string(),
                name: "Jane Doe".to_string(),
                dob: "1990-01-01".to_string(),
                email: format!("{}@example.com", policy_number),
                phone: phone.to_string(),
                sex: None,
                password_hash: "hash".to_string(),
            },
        )
        .await
        .unwrap();
    }

    /// Scripted call provider for tests.
    ///
    /// Status polls walk through the configured sequence and then repeat
    /// the last entry.
    pub struct MockProvider {
        statuses: Vec<CallStatus>,
        cursor: AtomicUsize,
        calls_placed: AtomicUsize,
        status_polls: AtomicUsize,
        call: Option<Call>,
        fail_create: bool,
        fail_status: bool,
    }

    impl MockProvider {
        pub fn new() -> Self {
            Self::with_statuses(vec![CallStatus::Completed])
        }

        pub fn with_statuses(statuses: Vec<CallStatus>) -> Self {
            Self {
                statuses,
                cursor: AtomicUsize::new(0),
                calls_placed: AtomicUsize::new(0),
                status_polls: AtomicUsize::new(0),
                call: None,
                fail_create: false,
                fail_status: false,
            }
        }

        /// Serve this record from `get_call`.
        pub fn with_call(mut self, call: Call) -> Self {
            self.call = Some(call);
            self
        }

        pub fn rejecting_calls() -> Self {
            Self {
                fail_create: true,
                ..Self::new()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail_status: true,
                ..Self::new()
            }
        }

        pub fn calls_placed(&self) -> usize {
            self.calls_placed.load(Ordering::SeqCst)
        }

        pub fn status_polls(&self) -> usize {
            self.status_polls.load(Ordering::SeqCst)
        }

        fn next_status(&self) -> CallStatus {
            let i = self.cursor.fetch_add(1, Ordering::SeqCst);
            let i = i.min(self.statuses.len() - 1);
            self.statuses[i]
        }
    }

    #[async_trait]
    impl CallProvider for MockProvider {
        async fn create_call(
            &self,
            _customer_number: &str,
            _prompt: &CallPrompt,
            _context: &CallContext,
        ) -> Result<String, VapiError> {
            if self.fail_create {
                return Err(VapiError::Unavailable {
                    status: 503,
                    body: "mock provider down".to_string(),
                });
            }
            let n = self.calls_placed.fetch_add(1, Ordering::SeqCst);
            Ok(format!("mock-call-{}", n + 1))
        }

        async fn call_status(&self, _call_id: &str) -> Result<CallStatus, VapiError> {
            self.status_polls.fetch_add(1, Ordering::SeqCst);
            if self.fail_status {
                return Err(VapiError::Unavailable {
                    status: 503,
                    body: "mock provider down".to_string(),
                });
            }
            Ok(self.next_status())
        }

        async fn get_call(&self, call_id: &str) -> Result<Call, VapiError> {
            if let Some(call) = &self.call {
                return Ok(call.clone());
            }
            Ok(Call {
                id: call_id.to_string(),
                status: Some(self.next_status()),
                ..Default::default()
            })
        }
    }
}
