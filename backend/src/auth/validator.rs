//! Per-request session validation
//!
//! The store is the only authority on liveness: every check is one live
//! lookup, with no caching and no writes.

use crate::auth::error::AuthError;
use crate::auth::middleware::AuthUser;
use crate::repositories::SessionStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error};
use werd_shared::validation::validate_session_token;
use werd_shared::SessionState;

/// Resolves session tokens to the identity that owns them
#[derive(Clone)]
pub struct SessionValidator {
    sessions: Arc<dyn SessionStore>,
}

impl SessionValidator {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    /// Validate a token against the current time
    pub async fn validate(&self, token: &str) -> Result<AuthUser, AuthError> {
        self.validate_at(token, Utc::now()).await
    }

    /// Validate a token as of `now`
    ///
    /// Unknown and expired tokens are both `Unauthorized`. A token that
    /// could never have been issued is rejected without touching the store.
    pub async fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<AuthUser, AuthError> {
        if validate_session_token(token).is_err() {
            debug!("Rejected session token with unexpected shape");
            return Err(AuthError::Unauthorized);
        }

        let session = self
            .sessions
            .find_by_token(token)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to look up session");
                AuthError::from(e)
            })?
            .ok_or(AuthError::Unauthorized)?;

        match session.state_at(now) {
            SessionState::Live => Ok(AuthUser {
                user_id: session.user_id,
                username: session.username,
            }),
            SessionState::Expired => {
                debug!(user_id = %session.user_id, "Rejected expired session");
                Err(AuthError::Unauthorized)
            }
        }
    }
}
