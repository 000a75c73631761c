//! Client record routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use database::{chatlog, client, ChatMessage, Client, ClientStatus, DatabaseError, NewClient, Sender};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Client signup request. Field names match the portal frontend.
#[derive(Deserialize)]
pub struct SignUpClientRequest {
    pub username: String,
    #[serde(rename = "DOB")]
    pub dob: String,
    pub policy_number: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
}

/// Request carrying just a policy number.
///
/// The frontend sometimes sends the policy number as a JSON number, so it
/// is accepted loosely and normalized to a string.
#[derive(Deserialize)]
pub struct PolicyNumberRequest {
    pub policy_number: serde_json::Value,
}

impl PolicyNumberRequest {
    fn policy_number(&self) -> Result<String> {
        policy_number_string(&self.policy_number)
    }
}

/// Status update request. Without an explicit status the record is marked
/// incomplete, which is what the dashboard flow sets.
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub policy_number: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Summary update request.
#[derive(Deserialize)]
pub struct UpdateSummaryRequest {
    pub policy_number: String,
    pub summary: String,
}

/// Chat log append request.
#[derive(Deserialize)]
pub struct UpdateChatlogRequest {
    pub policy_number: String,
    pub message: String,
    pub sender: String,
}

/// Message-only response body.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Listing response: the shape the dashboard expects.
#[derive(Serialize)]
pub struct ClientListResponse {
    pub users: Vec<Client>,
}

/// Identity confirmation response.
#[derive(Serialize)]
pub struct ConfirmUserResponse {
    pub message: String,
    pub has_active_policy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<Client>,
}

/// Register a client account.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpClientRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    for (field, value) in [
        ("username", &req.username),
        ("DOB", &req.dob),
        ("policy_number", &req.policy_number),
        ("email", &req.email),
        ("password", &req.password),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::BadRequest(format!(
                "Missing {} in request",
                field
            )));
        }
    }

    let password_hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)?;
    let new_client = NewClient {
        policy_number: req.policy_number.trim().to_string(),
        name: req.username.trim().to_string(),
        dob: req.dob.trim().to_string(),
        email: req.email.trim().to_string(),
        phone: req.phone.unwrap_or_default(),
        sex: req.sex,
        password_hash,
    };

    client::create_client(state.db.pool(), &new_client).await?;

    info!(policy_number = %new_client.policy_number, "Client registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Confirm a client's identity by policy number.
///
/// A missing policy is a normal outcome for this endpoint: a 404 with
/// `has_active_policy: false` in the body, never an error payload.
pub async fn confirm_user(
    State(state): State<AppState>,
    Json(req): Json<PolicyNumberRequest>,
) -> Result<Response> {
    let policy_number = req.policy_number()?;

    match client::get_client(state.db.pool(), &policy_number).await {
        Ok(found) => Ok(Json(ConfirmUserResponse {
            message: "Policy found".to_string(),
            has_active_policy: true,
            user_data: Some(found),
        })
        .into_response()),
        Err(DatabaseError::NotFound { .. }) => Ok((
            StatusCode::NOT_FOUND,
            Json(ConfirmUserResponse {
                message: "Policy not found".to_string(),
                has_active_policy: false,
                user_data: None,
            }),
        )
            .into_response()),
        Err(err) => Err(err.into()),
    }
}

/// Fetch a single client by policy number.
pub async fn get_by_policy(
    State(state): State<AppState>,
    Json(req): Json<PolicyNumberRequest>,
) -> Result<Json<Client>> {
    let policy_number = req.policy_number()?;
    let found = client::get_client(state.db.pool(), &policy_number).await?;
    Ok(Json(found))
}

/// List all clients.
pub async fn get_all(State(state): State<AppState>) -> Result<Json<ClientListResponse>> {
    let users = client::list_clients(state.db.pool()).await?;
    Ok(Json(ClientListResponse { users }))
}

/// List clients whose onboarding is incomplete.
pub async fn get_incomplete(State(state): State<AppState>) -> Result<Json<ClientListResponse>> {
    let users = client::list_clients_by_status(state.db.pool(), ClientStatus::Incomplete).await?;
    Ok(Json(ClientListResponse { users }))
}

/// Update a client's status.
pub async fn update_status(
    State(state): State<AppState>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<MessageResponse>> {
    let status = match req.status.as_deref() {
        None => ClientStatus::Incomplete,
        Some(value) => ClientStatus::parse(value).ok_or_else(|| {
            ApiError::BadRequest(format!(
                "Invalid status '{}': expected complete, incomplete, or active",
                value
            ))
        })?,
    };

    client::update_status(state.db.pool(), &req.policy_number, status).await?;

    Ok(Json(MessageResponse {
        message: format!("Status updated to '{}' successfully", status),
    }))
}

/// Update a client's rolling summary.
pub async fn update_summary(
    State(state): State<AppState>,
    Json(req): Json<UpdateSummaryRequest>,
) -> Result<Json<MessageResponse>> {
    client::update_summary(state.db.pool(), &req.policy_number, &req.summary).await?;

    Ok(Json(MessageResponse {
        message: "Summary updated successfully".to_string(),
    }))
}

/// Append a message to a client's chat log.
pub async fn update_chatlog(
    State(state): State<AppState>,
    Json(req): Json<UpdateChatlogRequest>,
) -> Result<Json<ChatMessage>> {
    let sender = Sender::parse_participant(&req.sender).ok_or_else(|| {
        ApiError::BadRequest(format!(
            "Invalid sender '{}': expected client or assistant",
            req.sender
        ))
    })?;

    let timestamp = chrono::Utc::now().to_rfc3339();
    let entry = chatlog::append_message(
        state.db.pool(),
        &req.policy_number,
        &req.message,
        sender,
        &timestamp,
    )
    .await?;

    Ok(Json(entry))
}

/// Normalize a policy number that may arrive as a JSON string or number.
fn policy_number_string(value: &serde_json::Value) -> Result<String> {
    match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        _ => Err(ApiError::BadRequest(
            "Policy number is required".to_string(),
        )),
    }
}
