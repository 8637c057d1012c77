//! Admin authentication.
//!
//! A single admin account is configured at startup. Logging in issues an
//! opaque session token, carried either in the `folio_session` cookie or as a
//! bearer token. Sessions live in memory and expire after a fixed lifetime.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "folio_session";

/// An issued admin session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque token.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Authentication collaborator.
#[cfg_attr(test, mockall::automock)]
pub trait Authenticator: Send + Sync {
    /// Check credentials and open a session.
    fn login(&self, email: &str, password: &str) -> Option<Session>;

    /// Whether `token` names a live session.
    fn is_authenticated(&self, token: &str) -> bool;

    /// End a session. Unknown tokens are ignored.
    fn logout(&self, token: &str);
}

/// In-memory sessions for the configured admin account.
#[derive(Debug)]
pub struct SessionAuth {
    email_digest: [u8; 32],
    password_digest: [u8; 32],
    ttl: Duration,
    sessions: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl SessionAuth {
    /// Create an authenticator for one admin account.
    #[must_use]
    pub fn new(admin_email: &str, admin_password: &str, ttl: Duration) -> Self {
        Self {
            email_digest: digest(admin_email.trim()),
            password_digest: digest(admin_password),
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Number of live sessions.
    #[must_use]
    pub fn active_sessions(&self) -> usize {
        let now = Utc::now();
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|expires| **expires > now)
            .count()
    }

    fn credentials_match(&self, email: &str, password: &str) -> bool {
        let email_ok = digests_equal(&digest(email.trim()), &self.email_digest);
        let password_ok = digests_equal(&digest(password), &self.password_digest);
        email_ok & password_ok
    }
}

impl Authenticator for SessionAuth {
    fn login(&self, email: &str, password: &str) -> Option<Session> {
        if email.trim().is_empty() || password.is_empty() {
            return None;
        }
        if !self.credentials_match(email, password) {
            warn!("Rejected admin login");
            return None;
        }

        let now = Utc::now();
        let session = Session {
            token: Uuid::new_v4().simple().to_string(),
            expires_at: now + self.ttl,
        };

        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.retain(|_, expires| *expires > now);
        sessions.insert(session.token.clone(), session.expires_at);
        info!("Admin logged in ({} active sessions)", sessions.len());
        Some(session)
    }

    fn is_authenticated(&self, token: &str) -> bool {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        match sessions.get(token) {
            Some(expires) if *expires > now => true,
            Some(_) => {
                debug!("Session expired");
                sessions.remove(token);
                false
            }
            None => false,
        }
    }

    fn logout(&self, token: &str) {
        let removed = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token)
            .is_some();
        if removed {
            info!("Admin logged out");
        }
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

/// Compare two digests without an early exit: every byte is visited.
fn digests_equal(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}

/// Session token from a bearer header or the session cookie.
#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|t| !t.is_empty())
}

/// `Set-Cookie` value for a new session.
#[must_use]
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie =
        format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that deletes the session cookie.
#[must_use]
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

/// Extractor that admits only requests carrying a live admin session.
#[derive(Debug, Clone)]
pub struct AdminSession {
    /// The accepted token.
    pub token: String,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match session_token(&parts.headers) {
            Some(token) if state.auth.is_authenticated(&token) => Ok(Self { token }),
            _ => {
                debug!("Unauthenticated request to {}", parts.uri.path());
                Err(ApiError::unauthorized())
            }
        }
    }
}
