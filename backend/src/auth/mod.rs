//! Authentication module
//!
//! Password verification (argon2, legacy bcrypt), RSA-signed session tokens
//! and the session middleware that guards protected routes.

mod jwt;
mod middleware;
mod password;

pub use jwt::{
    parse_signing_algorithm, Claims, JwtKeys, JwtService, TokenError, MAX_ACCESS_TOKEN_EXPIRY_SECS,
};
pub use middleware::{require_session, AuthUser};
pub use password::PasswordService;
