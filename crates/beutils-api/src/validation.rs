//! Input validation utilities for the beutils API
//!
//! Small checker functions for request fields, shared by handlers and
//! services.

use validator::ValidationError;

/// Maximum length for name and slug fields
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum length for person name fields
pub const MAX_PERSON_NAME_LENGTH: usize = 50;

/// Maximum length for currency codes
pub const MAX_CURRENCY_CODE_LENGTH: usize = 10;

/// Maximum length for email addresses
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for passwords
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate a display name
///
/// Names must be non-empty after trimming and fit the column width.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("name_empty"));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::new("name_too_long"));
    }
    Ok(())
}

/// Validate a currency code: 2-10 ASCII letters, case-insensitive
pub fn validate_currency_code(code: &str) -> Result<(), ValidationError> {
    let code = code.trim();
    if code.len() < 2 || code.len() > MAX_CURRENCY_CODE_LENGTH {
        return Err(ValidationError::new("currency_code_length"));
    }
    if !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::new("currency_code_invalid_chars"));
    }
    Ok(())
}

/// Validate an email address shape: local part, one `@`, dotted domain
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::new("email_empty"));
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::new("email_too_long"));
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::new("email_invalid"));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.contains('@') {
        return Err(ValidationError::new("email_invalid"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Western Europe").is_ok());
        assert!(validate_name("  ").is_err());
        assert!(validate_name(&"x".repeat(256)).is_err());
    }

    #[test]
    fn test_validate_currency_code() {
        assert!(validate_currency_code("USD").is_ok());
        assert!(validate_currency_code("usd").is_ok());
        assert!(validate_currency_code("U").is_err());
        assert!(validate_currency_code("US1").is_err());
        assert!(validate_currency_code("TOOLONGCODES").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ada@nodot").is_err());
        assert!(validate_email("").is_err());
    }
}
