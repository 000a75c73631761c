//! Outbound call routes: feedback follow-ups, history, and analysis.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use orchestrator::HistoryEvent;

use crate::error::Result;
use crate::state::AppState;

/// Request to place a feedback follow-up call.
#[derive(Deserialize)]
pub struct SendFeedbackRequest {
    pub policy_number: String,
    pub feedback: String,
}

/// Response for a placed follow-up call.
#[derive(Serialize)]
pub struct SendFeedbackResponse {
    pub success: bool,
    pub call_id: String,
}

/// Merged history response for one client.
#[derive(Serialize)]
pub struct CallHistoryResponse {
    pub policy_number: String,
    pub events: Vec<HistoryEvent>,
}

/// Place an outbound follow-up call about customer feedback.
///
/// The call is monitored in the background; the response returns as soon
/// as the call is placed and recorded.
pub async fn send_customer_feedback(
    State(state): State<AppState>,
    Json(req): Json<SendFeedbackRequest>,
) -> Result<Json<SendFeedbackResponse>> {
    let call_id = state
        .orchestrator
        .initiate_follow_up_call(&req.policy_number, &req.feedback)
        .await?;

    // Detached: the handle keeps the poll loop alive without blocking
    // this request.
    let _monitor = state.orchestrator.monitor_call(&call_id);

    Ok(Json(SendFeedbackResponse {
        success: true,
        call_id,
    }))
}

/// Merged interaction history for a client.
pub async fn call_history(
    State(state): State<AppState>,
    Path(policy_number): Path<String>,
) -> Result<Json<CallHistoryResponse>> {
    let events = state.orchestrator.call_history(&policy_number).await?;

    Ok(Json(CallHistoryResponse {
        policy_number,
        events,
    }))
}

/// Plain-text analysis of a client's most recent call.
pub async fn call_analysis(
    State(state): State<AppState>,
    Path(policy_number): Path<String>,
) -> Result<Json<String>> {
    let analysis = state.orchestrator.call_analysis(&policy_number).await?;
    Ok(Json(analysis))
}

/// Webhook placeholder for provider call events.
///
/// No push path is wired; status updates come from polling. Events that
/// arrive here are acknowledged and logged.
pub async fn call_hook(body: Option<Json<serde_json::Value>>) -> Json<serde_json::Value> {
    if let Some(Json(event)) = body {
        info!(event = %event, "Ignoring call webhook event");
    }
    Json(serde_json::Value::Null)
}
