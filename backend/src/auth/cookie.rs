//! Session cookie encoding
//!
//! The session token travels in a single `session_token` cookie. Reading
//! distinguishes a missing cookie (`Unauthorized`) from a Cookie header
//! that cannot be read as text at all (`BadRequest`).

use crate::auth::error::AuthError;
use axum::http::{header::COOKIE, HeaderMap};
use chrono::{DateTime, Utc};

pub const SESSION_COOKIE: &str = "session_token";

/// Extract the session token from the request's Cookie headers
pub fn session_token(headers: &HeaderMap) -> Result<String, AuthError> {
    for value in headers.get_all(COOKIE) {
        let cookies = value
            .to_str()
            .map_err(|_| AuthError::BadRequest("Malformed cookie header".to_string()))?;

        let token = cookies
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, value)| value.trim_matches('"'));

        if let Some(token) = token {
            return Ok(token.to_string());
        }
    }

    Err(AuthError::Unauthorized)
}

/// `Set-Cookie` value carrying a freshly issued token
pub fn issue(token: &str, expires_at: DateTime<Utc>) -> String {
    format!(
        "{}={}; Path=/; Expires={}; HttpOnly; SameSite=Lax",
        SESSION_COOKIE,
        token,
        expires_at.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}

/// `Set-Cookie` value telling the client to drop its token
pub fn clear() -> String {
    format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", SESSION_COOKIE)
}
