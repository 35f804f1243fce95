//! Authentication Handlers
//!
//! Handles admin login and token introspection

use std::time::Duration;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use shared::request::LoginRequest;
use shared::response::{CurrentUserResponse, LoginResponse};

use crate::auth::{ADMIN_ROLE, CurrentUser, verify_credentials};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 300;

/// Login handler
///
/// Checks the configured admin credential pair and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    let Json(req) = payload?;

    let valid = verify_credentials(&state.config, &req.username, &req.password);

    // Fixed delay before answering either way
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    if !valid {
        security_log!("WARN", "login_failed", username = req.username.as_str());
        return Err(AppError::InvalidCredentials);
    }

    let jwt_service = state.get_jwt_service();
    let token = jwt_service
        .generate_token(&req.username, ADMIN_ROLE)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(username = %req.username, "Admin logged in");

    Ok(ok(LoginResponse {
        token,
        username: req.username,
        expires_in: jwt_service.expires_in_seconds(),
    }))
}

/// Get current admin info
pub async fn me(user: CurrentUser) -> AppResult<Json<AppResponse<CurrentUserResponse>>> {
    Ok(ok(CurrentUserResponse {
        username: user.username,
        role: user.role,
    }))
}
