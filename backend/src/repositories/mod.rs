//! Database repositories
//!
//! Storage is reached through the [`CredentialStore`] and [`SessionStore`]
//! traits so the auth layer can be handed either the PostgreSQL
//! repositories or the in-process [`MemoryStore`].
//!
//! Stores hold no policy: the one-session-per-account rule lives in the
//! authentication service, which asks for a replacement explicitly.

pub mod memory;
pub mod session;
pub mod user;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;
use werd_shared::{Account, Session};

pub use memory::MemoryStore;
pub use session::SessionRepository;
pub use user::UserRepository;

/// Storage failures the auth layer can tell apart
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unique constraint violation: {constraint:?}")]
    UniqueViolation { constraint: Option<String> },

    #[error("Storage backend unavailable")]
    Unavailable,

    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::UniqueViolation {
                    constraint: db_err.constraint().map(str::to_string),
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => StoreError::Unavailable,
            _ => StoreError::Database(err),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Session row to persist
#[derive(Debug, Clone)]
pub struct NewSession {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Account table access
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Account>>;

    async fn username_exists(&self, username: &str) -> StoreResult<bool>;

    /// Fails with [`StoreError::UniqueViolation`] if the username is taken.
    async fn create(&self, username: &str, password_hash: &str) -> StoreResult<Account>;
}

/// Session table access
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Look up a session by token, joined with its owner's username.
    /// Expired rows are returned as-is; liveness is the caller's call.
    async fn find_by_token(&self, token: &str) -> StoreResult<Option<Session>>;

    /// Delete every session owned by `new.user_id`, then insert `new`,
    /// atomically. Returns how many sessions were removed.
    async fn replace_for_user(&self, new: &NewSession) -> StoreResult<u64>;

    /// Returns the number of rows removed; zero is not an error.
    async fn delete_by_token(&self, token: &str) -> StoreResult<u64>;

    /// Remove sessions whose expiry is at or before `now`.
    async fn delete_expired(&self, now: DateTime<Utc>) -> StoreResult<u64>;

    async fn health_check(&self) -> StoreResult<()>;
}
