//! Session token issuance and validation
//!
//! Tokens are RSA-signed JWTs under a single algorithm pinned at startup.
//! Keys and validation settings are pre-computed once and shared through
//! `AppState`.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use moneybags_shared::AuthError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::config::JwtConfig;

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer
    pub iss: String,
    /// Audience (same value as the issuer)
    pub aud: String,
    /// Subject (username)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Why a presented token was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid,

    #[error("token expired")]
    Expired,
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => AuthError::InvalidToken,
            TokenError::Expired => AuthError::ExpiredToken,
        }
    }
}

/// Longest session a configuration may ask for
pub const MAX_ACCESS_TOKEN_EXPIRY_SECS: i64 = 24 * 60 * 60;

/// Parse the configured signing algorithm
///
/// Only the RSA family is accepted: the keys are RSA, and an HMAC or EC
/// setting here would be a misconfiguration rather than a choice.
pub fn parse_signing_algorithm(name: &str) -> Result<Algorithm> {
    match name {
        "RS256" => Ok(Algorithm::RS256),
        "RS384" => Ok(Algorithm::RS384),
        "RS512" => Ok(Algorithm::RS512),
        "PS256" => Ok(Algorithm::PS256),
        "PS384" => Ok(Algorithm::PS384),
        "PS512" => Ok(Algorithm::PS512),
        other => Err(anyhow::anyhow!(
            "Unsupported JWT signing algorithm '{}': \
             expected one of RS256, RS384, RS512, PS256, PS384, PS512",
            other
        )),
    }
}

/// Pre-computed JWT keys for efficient token operations
/// These are expensive to create, so we cache them in AppState
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Build keys from an RSA private key PEM and its public counterpart
    pub fn from_rsa_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self> {
        let encoding =
            EncodingKey::from_rsa_pem(private_pem).context("Failed to parse RSA private key")?;
        let decoding =
            DecodingKey::from_rsa_pem(public_pem).context("Failed to parse RSA public key")?;

        Ok(Self {
            encoding: Arc::new(encoding),
            decoding: Arc::new(decoding),
        })
    }

    /// Load keys from PEM files
    /// This should be called once at startup
    pub fn load(
        private_key_file: impl AsRef<Path>,
        public_key_file: impl AsRef<Path>,
    ) -> Result<Self> {
        let private_key_file = private_key_file.as_ref();
        let public_key_file = public_key_file.as_ref();

        let private_pem = std::fs::read(private_key_file).with_context(|| {
            format!("Failed to read private key file {}", private_key_file.display())
        })?;
        let public_pem = std::fs::read(public_key_file).with_context(|| {
            format!("Failed to read public key file {}", public_key_file.display())
        })?;

        Self::from_rsa_pem(&private_pem, &public_pem)
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// JWT service for session token operations
///
/// Design: Uses pre-computed keys and validation settings. Everything is
/// behind `Arc`, so cloning per request is cheap and the state is never
/// mutated after startup.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    algorithm: Algorithm,
    issuer: Arc<str>,
    access_token_expiry_secs: i64,
    validation: Arc<Validation>,
}

impl JwtService {
    /// Create a new JWT service around pre-loaded keys
    pub fn new(
        keys: JwtKeys,
        algorithm: Algorithm,
        issuer: &str,
        access_token_expiry_secs: i64,
    ) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);

        Self {
            keys,
            algorithm,
            issuer: Arc::from(issuer),
            access_token_expiry_secs,
            validation: Arc::new(validation),
        }
    }

    /// Build the service from configuration, loading key files from disk
    ///
    /// Fails if the algorithm is unsupported, the expiry is outside
    /// `1..=MAX_ACCESS_TOKEN_EXPIRY_SECS`, a key cannot be read or parsed,
    /// or the two keys are not a matching pair.
    pub fn from_config(config: &JwtConfig) -> Result<Self> {
        let algorithm = parse_signing_algorithm(&config.signing_algorithm)?;
        if !(1..=MAX_ACCESS_TOKEN_EXPIRY_SECS).contains(&config.access_token_expiry_secs) {
            anyhow::bail!(
                "jwt.access_token_expiry_secs must be between 1 and {}, got {}",
                MAX_ACCESS_TOKEN_EXPIRY_SECS,
                config.access_token_expiry_secs
            );
        }
        let keys = JwtKeys::load(&config.private_key_file, &config.public_key_file)?;
        let service = Self::new(
            keys,
            algorithm,
            &config.issuer,
            config.access_token_expiry_secs,
        );
        service.check_key_pair()?;
        Ok(service)
    }

    /// Sign and verify a probe token so a mismatched key pair is caught at
    /// startup instead of on the first login
    pub fn check_key_pair(&self) -> Result<()> {
        let probe = self.issue("key-pair-probe")?;
        self.validate(&probe).map_err(|e| {
            anyhow::anyhow!(
                "JWT public key does not verify tokens signed by the private key: {}",
                e
            )
        })?;
        Ok(())
    }

    /// Issue a session token for a username
    #[inline]
    pub fn issue(&self, username: &str) -> Result<String> {
        self.issue_at(username, Utc::now())
    }

    /// Issue a session token as if it had been issued at `issued_at`
    pub fn issue_at(&self, username: &str, issued_at: DateTime<Utc>) -> Result<String> {
        let exp = Duration::try_seconds(self.access_token_expiry_secs)
            .and_then(|expiry| issued_at.checked_add_signed(expiry))
            .context("Session token expiry out of range")?;

        let claims = Claims {
            iss: self.issuer.to_string(),
            aud: self.issuer.to_string(),
            sub: username.to_string(),
            iat: issued_at.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to sign session token: {}", e))
    }

    /// Validate a session token and return its claims
    ///
    /// Rejects any token whose header names an algorithm other than the
    /// pinned one before the signature is looked at. Pure computation, no I/O.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, self.keys.decoding(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                kind => {
                    debug!(reason = ?kind, "Session token rejected");
                    TokenError::Invalid
                }
            })
    }

    /// The algorithm every token is signed and verified with
    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Get access token expiry in seconds
    #[inline]
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_token_expiry_secs
    }

    /// Get the pre-computed keys (for sharing)
    pub fn keys(&self) -> &JwtKeys {
        &self.keys
    }
}
