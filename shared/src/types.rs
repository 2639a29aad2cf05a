//! API request and response types

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Username/password form submitted to register and login
///
/// Missing fields deserialize as empty strings so that the service layer
/// reports them the same way as explicitly empty ones.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default = "empty_secret")]
    pub password: SecretString,
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

/// Identity of the caller behind a live session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUserResponse {
    pub user_id: String,
    pub username: String,
}

/// A dictionary word with the rarity tier it was drawn from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub rarity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_credentials_missing_fields_default_to_empty() {
        let creds: Credentials = serde_json::from_str("{}").unwrap();
        assert!(creds.username.is_empty());
        assert!(creds.password.expose_secret().is_empty());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds: Credentials =
            serde_json::from_str(r#"{"username":"alice","password":"hunter2"}"#).unwrap();
        let debug = format!("{:?}", creds);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }
}
