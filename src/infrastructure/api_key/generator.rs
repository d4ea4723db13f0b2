//! API key token generation
//!
//! Tokens are 128 random bits, URL-safe base64 encoded behind a short prefix.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;

use crate::domain::{DomainError, KeyToken};

const DEFAULT_KEY_BYTES: usize = 16;

/// Generator for opaque API key tokens
#[derive(Debug, Clone)]
pub struct KeyTokenGenerator {
    /// Prefix for all generated tokens (e.g. "tk_")
    prefix: String,
    key_bytes: usize,
}

impl KeyTokenGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            key_bytes: DEFAULT_KEY_BYTES,
        }
    }

    /// Set the number of random bytes
    pub fn with_key_bytes(mut self, bytes: usize) -> Self {
        self.key_bytes = bytes;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Generate a fresh token
    pub fn generate(&self) -> Result<KeyToken, DomainError> {
        let mut random_bytes = vec![0u8; self.key_bytes];
        rand::thread_rng().fill_bytes(&mut random_bytes);

        let token = format!("{}{}", self.prefix, URL_SAFE_NO_PAD.encode(&random_bytes));

        KeyToken::new(token).map_err(|e| {
            DomainError::internal(format!("Generated an unusable key token: {}", e))
        })
    }
}

impl Default for KeyTokenGenerator {
    fn default() -> Self {
        Self::new("tk_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token() {
        let token = KeyTokenGenerator::default().generate().unwrap();

        assert!(token.as_str().starts_with("tk_"));
        // 16 bytes base64-encoded without padding = 22 chars
        assert_eq!(token.as_str().len(), "tk_".len() + 22);
    }

    #[test]
    fn test_tokens_are_unique() {
        let generator = KeyTokenGenerator::default();

        let first = generator.generate().unwrap();
        let second = generator.generate().unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_custom_prefix_and_size() {
        let generator = KeyTokenGenerator::new("live-").with_key_bytes(32);
        let token = generator.generate().unwrap();

        assert!(token.as_str().starts_with("live-"));
        assert_eq!(token.as_str().len(), "live-".len() + 43);
    }

    #[test]
    fn test_invalid_prefix_is_internal_error() {
        let generator = KeyTokenGenerator::new("bad prefix ");

        let result = generator.generate();

        assert!(matches!(result, Err(DomainError::Internal { .. })));
    }
}
