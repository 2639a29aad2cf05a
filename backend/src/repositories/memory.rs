//! In-process store for tests and local development
//!
//! Implements both storage traits over one mutex-guarded state so that a
//! session lookup can resolve its owner's username the same way the SQL
//! join does. The lock is never held across an await point.

use super::{CredentialStore, NewSession, SessionStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;
use werd_shared::{Account, Session};

#[derive(Debug, Clone)]
struct StoredSession {
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
struct State {
    users: HashMap<String, Account>,
    sessions: HashMap<String, StoredSession>,
}

/// Shared in-memory credential and session store
///
/// Cloning shares the underlying data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with [`StoreError::Unavailable`]
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of sessions currently stored for a user, expired ones included
    pub fn session_count_for(&self, user_id: Uuid) -> usize {
        self.lock()
            .sessions
            .values()
            .filter(|s| s.user_id == user_id)
            .count()
    }

    pub fn session_count(&self) -> usize {
        self.lock().sessions.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn available(&self) -> StoreResult<MutexGuard<'_, State>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        Ok(self.lock())
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Account>> {
        Ok(self.available()?.users.get(username).cloned())
    }

    async fn username_exists(&self, username: &str) -> StoreResult<bool> {
        Ok(self.available()?.users.contains_key(username))
    }

    async fn create(&self, username: &str, password_hash: &str) -> StoreResult<Account> {
        let mut state = self.available()?;
        if state.users.contains_key(username) {
            return Err(StoreError::UniqueViolation {
                constraint: Some("users_username_key".to_string()),
            });
        }

        let account = Account {
            user_id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        state.users.insert(username.to_string(), account.clone());
        Ok(account)
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn find_by_token(&self, token: &str) -> StoreResult<Option<Session>> {
        let state = self.available()?;
        let Some(stored) = state.sessions.get(token) else {
            return Ok(None);
        };
        let owner = state.users.values().find(|a| a.user_id == stored.user_id);

        Ok(owner.map(|account| Session {
            token: token.to_string(),
            user_id: stored.user_id,
            username: account.username.clone(),
            expires_at: stored.expires_at,
            created_at: stored.created_at,
        }))
    }

    async fn replace_for_user(&self, new: &NewSession) -> StoreResult<u64> {
        let mut state = self.available()?;
        if state.sessions.contains_key(&new.token) {
            return Err(StoreError::UniqueViolation {
                constraint: Some("sessions_pkey".to_string()),
            });
        }

        let before = state.sessions.len();
        state.sessions.retain(|_, s| s.user_id != new.user_id);
        let removed = (before - state.sessions.len()) as u64;

        state.sessions.insert(
            new.token.clone(),
            StoredSession {
                user_id: new.user_id,
                expires_at: new.expires_at,
                created_at: Utc::now(),
            },
        );
        Ok(removed)
    }

    async fn delete_by_token(&self, token: &str) -> StoreResult<u64> {
        Ok(self.available()?.sessions.remove(token).map_or(0, |_| 1))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        let mut state = self.available()?;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| now < s.expires_at);
        Ok((before - state.sessions.len()) as u64)
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.available().map(|_| ())
    }
}
