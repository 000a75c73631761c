//! Employee account routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use database::{employee, DatabaseError};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Employee signup/login request.
#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Message-only response body.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Successful login response.
#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub email: String,
}

/// Register an employee account.
///
/// The password is stored as a bcrypt hash, never as plaintext.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Missing email or password in request".to_string(),
        ));
    }

    let password_hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)?;
    employee::create_employee(state.db.pool(), req.email.trim(), &password_hash).await?;

    info!(email = %req.email, "Employee registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Verify employee credentials.
///
/// Unknown emails and wrong passwords both return the same neutral 401.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Missing email or password in request".to_string(),
        ));
    }

    let employee = match employee::get_employee(state.db.pool(), req.email.trim()).await {
        Ok(employee) => employee,
        Err(DatabaseError::NotFound { .. }) => {
            return Err(ApiError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }
        Err(err) => return Err(err.into()),
    };

    if !bcrypt::verify(&req.password, &employee.password_hash)? {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        email: employee.email,
    }))
}
