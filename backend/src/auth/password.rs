//! Password hashing using bcrypt
//!
//! Hashes are self-describing (`$2b$<cost>$<salt><digest>`), so verifying
//! needs nothing but the stored string.
//!
//! bcrypt only reads the first 72 bytes of its input. Longer passwords are
//! refused outright rather than silently truncated.
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive. The async variants run on the
//! blocking thread pool so a login never stalls other requests.

use crate::auth::error::HashingError;
use tracing::warn;
use werd_shared::validation::MAX_PASSWORD_BYTES;

/// Password hashing service
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    cost: u32,
}

impl Default for PasswordService {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a non-default work factor. Only tests should need this.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password (blocking operation)
    pub fn hash(&self, password: &str) -> Result<String, HashingError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(HashingError::TooLong(MAX_PASSWORD_BYTES));
        }
        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// A mismatch is `false`, never an error. A stored hash that cannot be
    /// parsed also verifies as `false`, as does any password too long to
    /// have been hashed.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        if password.len() > MAX_PASSWORD_BYTES {
            return false;
        }
        match bcrypt::verify(password, hash) {
            Ok(valid) => valid,
            Err(e) => {
                warn!(error = %e, "Stored password hash could not be parsed");
                false
            }
        }
    }

    /// Hash a password on the blocking thread pool
    pub async fn hash_async(&self, password: String) -> Result<String, HashingError> {
        let service = *self;
        tokio::task::spawn_blocking(move || service.hash(&password)).await?
    }

    /// Verify a password on the blocking thread pool
    pub async fn verify_async(&self, password: String, hash: String) -> Result<bool, HashingError> {
        let service = *self;
        Ok(tokio::task::spawn_blocking(move || service.verify(&password, &hash)).await?)
    }
}
