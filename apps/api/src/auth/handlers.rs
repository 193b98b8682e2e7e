use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{clear_session_cookie, session_cookie, session_token};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: Option<String>,
}

/// POST /api/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let password = request.password.unwrap_or_default();
    if password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }

    if password != state.config.auth_password {
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }

    let token = state.sessions.create();
    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&token))]),
        Json(json!({ "success": true, "message": "Login successful" })),
    ))
}

/// POST /api/logout
///
/// Always succeeds, even without a session: revoking nothing is fine.
pub async fn handle_logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        state.sessions.revoke(&token);
    }

    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Json(json!({ "success": true, "message": "Logout successful" })),
    )
}

/// GET /api/auth-status
pub async fn handle_auth_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    let authenticated = session_token(&headers)
        .map(|token| state.sessions.validate(&token))
        .unwrap_or(false);
    Json(json!({ "authenticated": authenticated }))
}
