//! Route handlers for the portal API.

pub mod calls;
pub mod clients;
pub mod employees;
pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with the canonical route table.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health::home))
        .route("/health", get(health::health))
        // Employee portal
        .route("/SignUpEmployee", post(employees::sign_up))
        .route("/LoginEmployee", post(employees::login))
        // Client records
        .route("/SignUpClient", post(clients::sign_up))
        .route("/confirmUser", post(clients::confirm_user))
        .route("/GetClientByPolicyNumber", post(clients::get_by_policy))
        .route("/GetAllClients", get(clients::get_all))
        .route("/GetIncompleteClients", get(clients::get_incomplete))
        .route("/UpdateClientStatus", post(clients::update_status))
        .route("/UpdateClientSummary", post(clients::update_summary))
        .route("/UpdateClientChatlog", post(clients::update_chatlog))
        // Outbound calls
        .route("/SendCustomerFeedback", post(calls::send_customer_feedback))
        .route("/getCallHistory/:policy_number", get(calls::call_history))
        .route(
            "/getcall/:policy_number",
            get(calls::call_analysis).post(calls::call_analysis),
        )
        .route("/callhook", get(calls::call_hook).post(calls::call_hook))
}
