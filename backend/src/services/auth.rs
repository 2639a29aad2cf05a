//! Authentication service: registration, login and logout
//!
//! # Session replacement
//!
//! Login keeps at most one session per account. The old session is only
//! revoked once the password has been verified and a new token has been
//! minted, and the revoke and insert commit together, so a failed login
//! never leaves the account without its previous session.
//!
//! An unknown username still pays for one bcrypt verification, against a
//! placeholder hash, so response time does not reveal which accounts exist.

use crate::auth::{AuthError, PasswordService, TokenGenerator};
use crate::repositories::{CredentialStore, NewSession, SessionStore, StoreError};
use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};
use werd_shared::validation::validate_credentials;
use werd_shared::Account;

/// Input for the placeholder hash; no account can log in with it
const PLACEHOLDER_PASSWORD: &str = "werd-unknown-account";

/// How long a session stays live after login
pub const SESSION_LIFETIME_HOURS: i64 = 24;

pub fn session_lifetime() -> Duration {
    Duration::hours(SESSION_LIFETIME_HOURS)
}

/// Token handed to the client after a successful login
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Orchestrates credential checks and session lifecycle
///
/// Cheap to clone: stores are shared behind `Arc`.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn CredentialStore>,
    sessions: Arc<dyn SessionStore>,
    passwords: PasswordService,
    /// Hash checked when the username is unknown; built on first use
    placeholder_hash: Arc<OnceCell<String>>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn CredentialStore>,
        sessions: Arc<dyn SessionStore>,
        passwords: PasswordService,
    ) -> Self {
        Self {
            users,
            sessions,
            passwords,
            placeholder_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Register a new account. No session is created.
    pub async fn register(&self, username: &str, password: &SecretString) -> Result<Account, AuthError> {
        validate_credentials(username, password.expose_secret())?;

        info!(username, "Creating user");

        if self.users.username_exists(username).await.map_err(|e| {
            error!(error = %e, "Failed to check username availability");
            AuthError::from(e)
        })? {
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = self
            .passwords
            .hash_async(password.expose_secret().clone())
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to hash the password");
                AuthError::from(e)
            })?;

        match self.users.create(username, &password_hash).await {
            Ok(account) => Ok(account),
            // Lost a race with a concurrent registration
            Err(StoreError::UniqueViolation { .. }) => Err(AuthError::UsernameTaken),
            Err(e) => {
                error!(error = %e, "Failed to insert the user into the database");
                Err(e.into())
            }
        }
    }

    /// Verify credentials and issue a fresh session, revoking any prior one
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<IssuedSession, AuthError> {
        self.login_at(username, password, Utc::now()).await
    }

    pub async fn login_at(
        &self,
        username: &str,
        password: &SecretString,
        now: DateTime<Utc>,
    ) -> Result<IssuedSession, AuthError> {
        validate_credentials(username, password.expose_secret())?;

        let account = match self.users.find_by_username(username).await {
            Ok(Some(account)) => account,
            Ok(None) => {
                warn!(username, "Login for unknown username");
                self.burn_verification(password).await?;
                return Err(AuthError::Unauthorized);
            }
            Err(e) => {
                error!(error = %e, "Failed to look up user");
                return Err(e.into());
            }
        };

        let valid = self
            .passwords
            .verify_async(password.expose_secret().clone(), account.password_hash)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to verify the password");
                AuthError::from(e)
            })?;

        if !valid {
            debug!(username, "Login with wrong password");
            return Err(AuthError::Unauthorized);
        }

        let token = TokenGenerator::generate().map_err(|e| {
            error!(error = %e, "Failed to generate session token");
            AuthError::from(e)
        })?;
        let expires_at = now + session_lifetime();

        let replaced = self
            .sessions
            .replace_for_user(&NewSession {
                token: token.clone(),
                user_id: account.user_id,
                expires_at,
            })
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to store the session");
                AuthError::from(e)
            })?;

        info!(user_id = %account.user_id, replaced, "Session issued");

        Ok(IssuedSession { token, expires_at })
    }

    /// Spend the same bcrypt work a real verification would
    async fn burn_verification(&self, password: &SecretString) -> Result<(), AuthError> {
        let placeholder = self
            .placeholder_hash
            .get_or_try_init(|| self.passwords.hash_async(PLACEHOLDER_PASSWORD.to_string()))
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to build the placeholder hash");
                AuthError::from(e)
            })?;

        self.passwords
            .verify_async(password.expose_secret().clone(), placeholder.clone())
            .await?;
        Ok(())
    }

    /// Revoke the session behind `token`. Revoking an unknown or already
    /// revoked token succeeds.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let removed = self.sessions.delete_by_token(token).await.map_err(|e| {
            error!(error = %e, "Failed to delete the session");
            AuthError::from(e)
        })?;

        debug!(removed, "Session revoked");
        Ok(())
    }

    /// Delete sessions that are already past expiry
    ///
    /// Storage hygiene only; validation never depends on it.
    pub async fn sweep_expired(&self) -> Result<u64, AuthError> {
        let removed = self.sessions.delete_expired(Utc::now()).await?;
        if removed > 0 {
            info!(removed, "Swept expired sessions");
        }
        Ok(removed)
    }

    /// Run [`Self::sweep_expired`] forever on a fixed period
    pub async fn run_session_sweeper(self, period: std::time::Duration) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            if let Err(e) = self.sweep_expired().await {
                warn!(error = ?e, "Expired session sweep failed");
            }
        }
    }
}
