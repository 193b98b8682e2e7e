//! Shared-password session gate.
//!
//! One login password for the whole service. A successful login mints an
//! opaque v4-UUID token held in an in-process map with a 24h TTL and handed
//! back as an HttpOnly cookie. Sessions do not survive a restart.

pub mod handlers;

use std::collections::HashMap;
use std::sync::Mutex;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "fooh_sid";
const SESSION_TTL_HOURS: i64 = 24;

/// In-process session token store. Expired tokens are purged lazily when
/// they are next presented.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a fresh token valid for the session TTL.
    pub fn create(&self) -> String {
        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + Duration::hours(SESSION_TTL_HOURS);
        self.sessions
            .lock()
            .expect("session mutex poisoned")
            .insert(token.clone(), expires_at);
        token
    }

    pub fn validate(&self, token: &str) -> bool {
        let mut sessions = self.sessions.lock().expect("session mutex poisoned");
        match sessions.get(token) {
            Some(expires_at) if *expires_at > Utc::now() => true,
            Some(_) => {
                sessions.remove(token);
                false
            }
            None => false,
        }
    }

    pub fn revoke(&self, token: &str) {
        self.sessions
            .lock()
            .expect("session mutex poisoned")
            .remove(token);
    }

    #[cfg(test)]
    fn insert_with_expiry(&self, token: &str, expires_at: DateTime<Utc>) {
        self.sessions
            .lock()
            .expect("session mutex poisoned")
            .insert(token.to_string(), expires_at);
    }
}

/// Extracts the session token from a `Cookie` header, if present.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age=86400")
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Middleware guarding everything except `/health` and the auth endpoints.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let authenticated = session_token(request.headers())
        .map(|token| state.sessions.validate(&token))
        .unwrap_or(false);

    if !authenticated {
        return Err(AppError::Unauthorized("Authentication required".to_string()));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_create_then_validate() {
        let store = SessionStore::new();
        let token = store.create();
        assert!(store.validate(&token));
        assert!(!store.validate("not-a-token"));
    }

    #[test]
    fn test_revoked_token_is_rejected() {
        let store = SessionStore::new();
        let token = store.create();
        store.revoke(&token);
        assert!(!store.validate(&token));
    }

    #[test]
    fn test_expired_token_is_rejected_and_purged() {
        let store = SessionStore::new();
        store.insert_with_expiry("stale", Utc::now() - Duration::hours(1));
        assert!(!store.validate("stale"));
        // Second presentation: the token is gone, not merely expired.
        assert!(store.sessions.lock().unwrap().get("stale").is_none());
    }

    #[test]
    fn test_session_token_parsed_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("other=1; fooh_sid=abc-123; theme=dark"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_session_token_absent() {
        let mut headers = HeaderMap::new();
        assert!(session_token(&headers).is_none());

        headers.insert(header::COOKIE, HeaderValue::from_static("other=1"));
        assert!(session_token(&headers).is_none());
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("tok");
        assert!(cookie.starts_with("fooh_sid=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(clear_session_cookie().contains("Max-Age=0"));
    }
}
