//! Input validation functions
//!
//! Credential fields only need to be present; no trimming or
//! character-class rules are applied. Passwords are capped at the 72 bytes
//! bcrypt actually reads.

use crate::errors::ValidationError;
use validator::ValidateLength;

/// bcrypt ignores everything past this many bytes of input
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Number of random bytes behind a session token
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Length of a hex-encoded session token
pub const SESSION_TOKEN_LEN: usize = SESSION_TOKEN_BYTES * 2;

/// Validate that neither credential field is empty and that the password
/// fits in bcrypt's input
pub fn validate_credentials(username: &str, password: &str) -> Result<(), ValidationError> {
    if !username.validate_length(Some(1), None, None) {
        return Err(ValidationError::Empty { field: "username" });
    }
    if !password.validate_length(Some(1), None, None) {
        return Err(ValidationError::Empty { field: "password" });
    }
    // Byte length, not characters
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::PasswordTooLong {
            max: MAX_PASSWORD_BYTES,
        });
    }
    Ok(())
}

/// Check that a token has the shape the token generator produces
pub fn validate_session_token(token: &str) -> Result<(), ValidationError> {
    let well_formed = token.len() == SESSION_TOKEN_LEN
        && token
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));

    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::MalformedToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("alice", "pw1", true)]
    #[case(" ", " ", true)]
    #[case("", "pw1", false)]
    #[case("alice", "", false)]
    #[case("", "", false)]
    fn test_validate_credentials(#[case] username: &str, #[case] password: &str, #[case] ok: bool) {
        assert_eq!(validate_credentials(username, password).is_ok(), ok);
    }

    #[test]
    fn test_empty_username_reported_first() {
        assert_eq!(
            validate_credentials("", ""),
            Err(ValidationError::Empty { field: "username" })
        );
    }

    #[test]
    fn test_password_byte_limit() {
        assert!(validate_credentials("alice", &"a".repeat(MAX_PASSWORD_BYTES)).is_ok());
        assert_eq!(
            validate_credentials("alice", &"a".repeat(MAX_PASSWORD_BYTES + 1)),
            Err(ValidationError::PasswordTooLong { max: MAX_PASSWORD_BYTES })
        );
        // 36 two-byte characters fill the limit exactly; one more overflows it
        assert!(validate_credentials("alice", &"é".repeat(36)).is_ok());
        assert!(validate_credentials("alice", &"é".repeat(37)).is_err());
    }

    #[rstest]
    #[case("")]
    #[case("not-a-token")]
    #[case(&"A".repeat(SESSION_TOKEN_LEN))]
    #[case(&"a".repeat(SESSION_TOKEN_LEN - 1))]
    #[case(&"a".repeat(SESSION_TOKEN_LEN + 1))]
    fn test_malformed_tokens_rejected(#[case] token: &str) {
        assert_eq!(validate_session_token(token), Err(ValidationError::MalformedToken));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_lowercase_hex_tokens_accepted(token in "[0-9a-f]{64}") {
            prop_assert!(validate_session_token(&token).is_ok());
        }

        #[test]
        fn prop_non_empty_credentials_accepted(username in ".{1,64}", password in "[ -~]{1,72}") {
            prop_assert!(validate_credentials(&username, &password).is_ok());
        }
    }
}
