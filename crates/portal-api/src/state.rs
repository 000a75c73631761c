//! Application state shared across handlers.

use std::sync::Arc;

use database::Database;
use orchestrator::CallOrchestrator;
use vapi_client::VapiClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Call lifecycle orchestrator.
    pub orchestrator: Arc<CallOrchestrator<VapiClient>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, orchestrator: CallOrchestrator<VapiClient>) -> Self {
        Self {
            db,
            orchestrator: Arc::new(orchestrator),
        }
    }
}
