//! Error types for the Werd application

use thiserror::Error;

/// Input validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("password must be at most {max} bytes")]
    PasswordTooLong { max: usize },

    #[error("Malformed session token")]
    MalformedToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_field_message() {
        let err = ValidationError::Empty { field: "username" };
        assert_eq!(err.to_string(), "username must not be empty");
    }

    #[test]
    fn test_password_too_long_message() {
        let err = ValidationError::PasswordTooLong { max: 72 };
        assert_eq!(err.to_string(), "password must be at most 72 bytes");
    }
}
