//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! Storage handles are constructed once at startup and injected here;
//! nothing reaches for a global connection.

use crate::auth::{PasswordService, SessionValidator};
use crate::config::AppConfig;
use crate::repositories::{CredentialStore, SessionRepository, SessionStore, UserRepository};
use crate::services::{AuthService, WordBank};
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
///
/// All fields are cheap to clone (`Arc` or `Arc`-backed).
#[derive(Clone)]
pub struct AppState {
    /// Registration, login and logout
    pub auth: AuthService,
    /// Session interceptor for protected routes
    pub validator: SessionValidator,
    /// Storage used by readiness probes
    pub sessions: Arc<dyn SessionStore>,
    pub words: Arc<WordBank>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create application state backed by PostgreSQL
    pub fn new(db: PgPool, words: WordBank, config: AppConfig) -> Self {
        Self::with_stores(
            Arc::new(UserRepository::new(db.clone())),
            Arc::new(SessionRepository::new(db)),
            PasswordService::new(),
            words,
            config,
        )
    }

    /// Create application state over arbitrary stores
    pub fn with_stores(
        users: Arc<dyn CredentialStore>,
        sessions: Arc<dyn SessionStore>,
        passwords: PasswordService,
        words: WordBank,
        config: AppConfig,
    ) -> Self {
        Self {
            auth: AuthService::new(users, sessions.clone(), passwords),
            validator: SessionValidator::new(sessions.clone()),
            sessions,
            words: Arc::new(words),
            config: Arc::new(config),
        }
    }

    #[inline]
    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    #[inline]
    pub fn validator(&self) -> &SessionValidator {
        &self.validator
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
