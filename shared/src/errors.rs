//! Error types for the Moneybags application

use thiserror::Error;

/// Authentication error types
///
/// The `Display` text is for server-side logs only. Every variant is
/// rendered to clients as the same kind of 401.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    ExpiredToken,

    #[error("Missing token")]
    MissingToken,
}

impl AuthError {
    /// Whether this error came from presenting a session token
    /// (as opposed to logging in with a username and password)
    pub fn is_session_error(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::ExpiredToken | AuthError::MissingToken
        )
    }
}

/// Registration input rejected by validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid username: {0}")]
    InvalidUsername(String),

    #[error("invalid password: {0}")]
    InvalidPassword(String),

    #[error("invalid email: {0}")]
    InvalidEmail(String),

    #[error("invalid name: {0}")]
    InvalidName(String),
}

impl ValidationError {
    /// Name of the offending request field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidUsername(_) => "username",
            ValidationError::InvalidPassword(_) => "password",
            ValidationError::InvalidEmail(_) => "email",
            ValidationError::InvalidName(_) => "name",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_errors() {
        assert!(AuthError::InvalidToken.is_session_error());
        assert!(AuthError::ExpiredToken.is_session_error());
        assert!(!AuthError::InvalidCredentials.is_session_error());
        assert!(!AuthError::UserNotFound.is_session_error());
    }

    #[test]
    fn test_validation_error_field() {
        let err = ValidationError::InvalidPassword("too short".to_string());
        assert_eq!(err.field(), "password");
        assert_eq!(err.to_string(), "invalid password: too short");
    }
}
