//! Session token generation

use crate::auth::error::EntropyError;
use rand::{rngs::OsRng, RngCore};
use werd_shared::validation::SESSION_TOKEN_BYTES;

/// Source of opaque bearer tokens
///
/// Tokens are 256 bits read straight from the OS CSPRNG and hex-encoded.
/// If the OS source fails the error is returned; there is no fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenGenerator;

impl TokenGenerator {
    pub fn generate() -> Result<String, EntropyError> {
        let mut bytes = [0u8; SESSION_TOKEN_BYTES];
        OsRng.try_fill_bytes(&mut bytes)?;
        Ok(hex::encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use werd_shared::validation::{validate_session_token, SESSION_TOKEN_LEN};

    #[test]
    fn test_token_shape() {
        let token = TokenGenerator::generate().unwrap();
        assert_eq!(token.len(), SESSION_TOKEN_LEN);
        assert!(validate_session_token(&token).is_ok());
    }

    #[test]
    fn test_tokens_are_distinct() {
        let tokens: HashSet<String> = (0..10_000)
            .map(|_| TokenGenerator::generate().unwrap())
            .collect();
        assert_eq!(tokens.len(), 10_000);
    }

    #[test]
    fn test_tokens_use_every_hex_digit() {
        let mut seen = HashSet::new();
        for _ in 0..100 {
            seen.extend(TokenGenerator::generate().unwrap().chars());
        }
        assert_eq!(seen.len(), 16);
    }
}
