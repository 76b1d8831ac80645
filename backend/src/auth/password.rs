//! Password hashing and verification
//!
//! New hashes are Argon2id PHC strings. Hashes in bcrypt format, carried
//! over from accounts created by the previous deployment, still verify.
//!
//! # Performance Considerations
//!
//! Both schemes are intentionally CPU-intensive. In async contexts use the
//! `_async` variants, which run on the blocking thread pool.

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;

/// Stored-hash scheme, identified by the hash's own prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HashScheme {
    Argon2,
    Bcrypt,
}

impl HashScheme {
    fn of(stored_hash: &str) -> Option<Self> {
        if stored_hash.starts_with("$argon2") {
            Some(HashScheme::Argon2)
        } else if ["$2a$", "$2b$", "$2x$", "$2y$"]
            .iter()
            .any(|prefix| stored_hash.starts_with(prefix))
        {
            Some(HashScheme::Bcrypt)
        } else {
            None
        }
    }
}

/// Hash verified against when a login names an unknown user, so the
/// response takes as long as a real password check
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| PasswordService::hash("moneybags-timing-equalizer").ok());

/// Password hashing service
///
/// Uses Argon2id which is the recommended variant for password hashing.
/// It provides resistance against both side-channel and GPU-based attacks.
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using argon2 (blocking operation)
    pub fn hash(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// Returns `Ok(false)` on mismatch. Errors only when the stored hash
    /// itself is malformed.
    pub fn verify(password: &str, stored_hash: &str) -> Result<bool> {
        match HashScheme::of(stored_hash) {
            Some(HashScheme::Argon2) => {
                let parsed_hash = PasswordHash::new(stored_hash)
                    .map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
                match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
                    Ok(()) => Ok(true),
                    Err(argon2::password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(anyhow::anyhow!("Invalid hash format: {}", e)),
                }
            }
            Some(HashScheme::Bcrypt) => bcrypt::verify(password, stored_hash)
                .map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e)),
            None => Err(anyhow::anyhow!("Invalid hash format: unrecognized scheme")),
        }
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, stored_hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &stored_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Burn one verification's worth of CPU without a real hash
    pub async fn verify_dummy_async(password: String) {
        let _ = tokio::task::spawn_blocking(move || {
            if let Some(hash) = DUMMY_HASH.as_deref() {
                let _ = Self::verify(&password, hash);
            }
        })
        .await;
    }
}
