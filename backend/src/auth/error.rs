//! Authentication error taxonomy
//!
//! Everything the auth layer can fail with is folded into [`AuthError`]
//! before it reaches a handler. Storage and hashing detail stays inside
//! `Internal` and is only ever logged.

use crate::repositories::StoreError;
use thiserror::Error;
use werd_shared::ValidationError;

/// Password hashing failed for a reason other than a mismatch
#[derive(Error, Debug)]
pub enum HashingError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("password longer than {0} bytes")]
    TooLong(usize),
}

/// The operating system's secure random source is unavailable
#[derive(Error, Debug)]
#[error("secure random source unavailable: {0}")]
pub struct EntropyError(#[from] pub rand::Error);

/// Errors surfaced by the authentication service and session validator
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Deliberately carries no detail: unknown user, wrong password,
    /// missing, unknown and expired sessions all look the same.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Internal error")]
    Internal(#[source] anyhow::Error),
}

impl From<ValidationError> for AuthError {
    fn from(err: ValidationError) -> Self {
        AuthError::BadRequest(err.to_string())
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::Internal(err.into())
    }
}

impl From<HashingError> for AuthError {
    fn from(err: HashingError) -> Self {
        AuthError::Internal(err.into())
    }
}

impl From<EntropyError> for AuthError {
    fn from(err: EntropyError) -> Self {
        AuthError::Internal(err.into())
    }
}
