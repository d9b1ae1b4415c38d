//! Registration and login handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResult, ok};
use crate::user_auth::{AuthResponse, LoginRequest, RegisterRequest};

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub username: String,
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<RegisterResponse> {
    if req.username.len() < 3 || !req.username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return ApiError::bad_request("username must be at least 3 alphanumeric characters")
            .into_err();
    }
    if !req.email.contains('@') {
        return ApiError::bad_request("invalid email").into_err();
    }
    if req.password.len() < 8 {
        return ApiError::bad_request("password must be at least 8 characters").into_err();
    }

    match state.user_auth.register(req).await {
        Ok(username) => {
            tracing::info!(username = %username, "User registered");
            ok(RegisterResponse { username })
        }
        Err(e) => ApiError::bad_request(e.to_string()).into_err(),
    }
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<AuthResponse> {
    match state.user_auth.login(req).await {
        Ok(resp) => ok(resp),
        Err(e) => {
            tracing::debug!("Login rejected: {}", e);
            ApiError::unauthorized("invalid email or password").into_err()
        }
    }
}
