//! Input validation functions
//!
//! Registration and resource-creation input is checked here before any
//! hashing or storage work happens.

use crate::errors::ValidationError;
use validator::ValidateEmail;

/// Minimum password length, in characters
pub const MIN_PASSWORD_CHARS: usize = 12;

/// Maximum password length, in characters. Bounds the hashing work per request.
pub const MAX_PASSWORD_CHARS: usize = 256;

/// Maximum username length, in characters
pub const MAX_USERNAME_CHARS: usize = 64;

/// Maximum budget / bank account name length, in characters
pub const MAX_NAME_CHARS: usize = 128;

/// Validate a username
///
/// Usernames are case-sensitive and stored verbatim, so anything that would
/// make two visually identical names differ (whitespace, control characters)
/// is rejected.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::InvalidUsername(
            "username cannot be empty".to_string(),
        ));
    }
    if username.chars().count() > MAX_USERNAME_CHARS {
        return Err(ValidationError::InvalidUsername(format!(
            "username must be at most {} characters",
            MAX_USERNAME_CHARS
        )));
    }
    if username
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(ValidationError::InvalidUsername(
            "username cannot contain whitespace or control characters".to_string(),
        ));
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_CHARS {
        return Err(ValidationError::InvalidPassword(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_CHARS
        )));
    }
    if len > MAX_PASSWORD_CHARS {
        return Err(ValidationError::InvalidPassword(format!(
            "password must be at most {} characters",
            MAX_PASSWORD_CHARS
        )));
    }
    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !email.validate_email() {
        return Err(ValidationError::InvalidEmail(
            "invalid email format".to_string(),
        ));
    }
    Ok(())
}

/// Validate a budget or bank account name
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::InvalidName("name cannot be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::InvalidName(format!(
            "name must be at most {} characters",
            MAX_NAME_CHARS
        )));
    }
    Ok(())
}
