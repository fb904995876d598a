//! Error types for beutils
//!
//! `BeutilsError` covers the failure classes of the utility crates; request
//! handlers map these onto HTTP responses, everything else bubbles through
//! `anyhow` at the application edges.

/// Application-specific error types
#[derive(thiserror::Error, Debug)]
pub enum BeutilsError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    Conflict(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("http error: {0}")]
    Http(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl BeutilsError {
    /// Build a validation error from any displayable message
    pub fn validation(message: impl Into<String>) -> Self {
        BeutilsError::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BeutilsError::Validation("name cannot be an empty string".to_string());
        assert_eq!(format!("{}", err), "name cannot be an empty string");

        let err = BeutilsError::NotFound("currency 'XYZ'".to_string());
        assert_eq!(format!("{}", err), "currency 'XYZ' not found");

        let err = BeutilsError::Auth("invalid token".to_string());
        assert_eq!(format!("{}", err), "authentication error: invalid token");
    }
}
