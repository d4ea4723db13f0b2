//! JWT issuance and verification (HS256, shared secret)

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::config::AuthConfig;
use crate::domain::DomainError;

/// A century; keeps the expiry inside chrono's range
const MAX_EXPIRATION_HOURS: u64 = 24 * 365 * 100;

/// Claims carried by identity tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (account ID)
    pub sub: String,
    pub email: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    pub fn new(sub: impl Into<String>, email: impl Into<String>, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours.min(MAX_EXPIRATION_HOURS) as i64);

        Self {
            sub: sub.into(),
            email: email.into(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    pub fn account_id(&self) -> &str {
        &self.sub
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }
}

impl From<&AuthConfig> for JwtConfig {
    fn from(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, u64::from(config.token_expiration_hours))
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::from(&AuthConfig::default())
    }
}

/// Token operations the API layer depends on
pub trait JwtGenerator: Send + Sync + Debug {
    /// Mint a token for the given identity
    fn generate(&self, sub: &str, email: &str) -> Result<String, DomainError>;

    /// Verify signature and expiry, returning the claims
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;

    fn expiration_hours(&self) -> u64;
}

#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration_hours", &self.config.expiration_hours)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }
}

impl JwtGenerator for JwtService {
    fn generate(&self, sub: &str, email: &str) -> Result<String, DomainError> {
        let claims = JwtClaims::new(sub, email, self.config.expiration_hours);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))
    }

    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| DomainError::validation(format!("Invalid JWT: {}", e)))?;

        Ok(token_data.claims)
    }

    fn expiration_hours(&self) -> u64 {
        self.config.expiration_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_service() -> JwtService {
        JwtService::new(JwtConfig::new("test-secret-key-12345", 24))
    }

    #[test]
    fn test_generate_and_validate() {
        let service = create_service();

        let token = service.generate("user-1", "user@example.com").unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "user@example.com");
        assert_eq!(claims.account_id(), "user-1");
        assert!(!claims.is_expired());
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_invalid_token() {
        let result = create_service().validate("invalid-token");

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_wrong_secret() {
        let issuer = JwtService::new(JwtConfig::new("secret-1", 24));
        let verifier = JwtService::new(JwtConfig::new("secret-2", 24));

        let token = issuer.generate("user-1", "user@example.com").unwrap();

        assert!(verifier.validate(&token).is_err());
    }

    #[test]
    fn test_expired_token() {
        let service = JwtService::new(JwtConfig::new("test-secret", 24));
        let past = Utc::now() - Duration::hours(1);
        let claims = JwtClaims {
            sub: "user-1".to_string(),
            email: "user@example.com".to_string(),
            iat: (past - Duration::hours(2)).timestamp(),
            exp: past.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(claims.is_expired());
        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_config_from_auth_section() {
        let auth = AuthConfig {
            jwt_secret: "from-config".to_string(),
            token_expiration_hours: 48,
            ..AuthConfig::default()
        };

        let service = JwtService::new(JwtConfig::from(&auth));

        assert_eq!(service.expiration_hours(), 48);
    }
}
