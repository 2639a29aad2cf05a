//! Data models for the Werd application

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub user_id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Liveness of a session, computed at lookup time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Live,
    Expired,
}

/// Active login session
///
/// The owning account's username is resolved together with the session so
/// that a single lookup is enough to identify the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(skip_serializing)]
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// A session is live strictly before its expiry instant.
    pub fn state_at(&self, now: DateTime<Utc>) -> SessionState {
        if now < self.expires_at {
            SessionState::Live
        } else {
            SessionState::Expired
        }
    }

    #[inline]
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.state_at(now) == SessionState::Live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn session_expiring_at(expires_at: DateTime<Utc>) -> Session {
        Session {
            token: "ab".repeat(32),
            user_id: Uuid::new_v4(),
            username: "alice".to_string(),
            expires_at,
            created_at: expires_at - Duration::hours(24),
        }
    }

    #[test]
    fn test_session_expires_exactly_at_deadline() {
        let expires_at = Utc::now();
        let session = session_expiring_at(expires_at);

        assert_eq!(session.state_at(expires_at - Duration::milliseconds(1)), SessionState::Live);
        assert_eq!(session.state_at(expires_at), SessionState::Expired);
        assert_eq!(session.state_at(expires_at + Duration::seconds(1)), SessionState::Expired);
    }

    #[test]
    fn test_session_token_not_serialized() {
        let session = session_expiring_at(Utc::now());
        let json = serde_json::to_string(&session).unwrap();
        assert!(!json.contains(&session.token));
        assert!(json.contains("alice"));
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let account = Account {
            user_id: Uuid::new_v4(),
            username: "bob".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("password_hash"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// A session is live if and only if now < expires_at
        #[test]
        fn prop_live_iff_before_expiry(offset_secs in -172_800i64..172_800) {
            let expires_at = Utc::now();
            let session = session_expiring_at(expires_at);
            let now = expires_at + Duration::seconds(offset_secs);

            prop_assert_eq!(session.is_live_at(now), now < expires_at);
        }
    }
}
