//! Account validation utilities

use thiserror::Error;

/// Errors that can occur during account validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AccountValidationError {
    #[error("Account ID cannot be empty")]
    EmptyId,

    #[error("Account ID exceeds maximum length of {0} characters")]
    IdTooLong(usize),

    #[error("Account ID contains invalid character: '{0}'. Only alphanumeric characters, hyphens, and underscores are allowed")]
    InvalidIdCharacter(char),

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email exceeds maximum length of {0} characters")]
    EmailTooLong(usize),

    #[error("Email must have the form local@domain")]
    MalformedEmail,
}

const MAX_ACCOUNT_ID_LENGTH: usize = 128;
const MAX_EMAIL_LENGTH: usize = 254;

/// Validate an account ID as issued by the identity provider
///
/// Rules:
/// - Cannot be empty
/// - Maximum 128 characters
/// - Only alphanumeric characters, hyphens and underscores
pub fn validate_account_id(id: &str) -> Result<(), AccountValidationError> {
    if id.is_empty() {
        return Err(AccountValidationError::EmptyId);
    }

    if id.len() > MAX_ACCOUNT_ID_LENGTH {
        return Err(AccountValidationError::IdTooLong(MAX_ACCOUNT_ID_LENGTH));
    }

    if let Some(c) = id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(AccountValidationError::InvalidIdCharacter(c));
    }

    Ok(())
}

/// Validate an email address
///
/// Only the coarse shape is checked; the identity provider owns verification.
pub fn validate_email(email: &str) -> Result<(), AccountValidationError> {
    if email.is_empty() {
        return Err(AccountValidationError::EmptyEmail);
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(AccountValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace) =>
        {
            Ok(())
        }
        _ => Err(AccountValidationError::MalformedEmail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_account_ids() {
        assert!(validate_account_id("user-1").is_ok());
        assert!(validate_account_id("Xy7pQ2aBc9dEfGh1IjKlMnOpQr").is_ok());
        assert!(validate_account_id("with_underscore").is_ok());
    }

    #[test]
    fn test_invalid_account_ids() {
        assert_eq!(validate_account_id(""), Err(AccountValidationError::EmptyId));
        assert_eq!(
            validate_account_id(&"a".repeat(129)),
            Err(AccountValidationError::IdTooLong(128))
        );
        assert_eq!(
            validate_account_id("user/1"),
            Err(AccountValidationError::InvalidIdCharacter('/'))
        );
    }

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("first.last+tag@example.com").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(validate_email(""), Err(AccountValidationError::EmptyEmail));
        assert_eq!(validate_email("nope"), Err(AccountValidationError::MalformedEmail));
        assert_eq!(validate_email("@example.com"), Err(AccountValidationError::MalformedEmail));
        assert_eq!(validate_email("a@b@c"), Err(AccountValidationError::MalformedEmail));
        assert_eq!(validate_email("a b@c.d"), Err(AccountValidationError::MalformedEmail));
    }
}
