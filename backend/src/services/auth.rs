//! Login: exchange a username and password for a session token

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::Stores;
use moneybags_shared::{AuthError, TokenResponse};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

pub struct AuthService;

impl AuthService {
    /// Verify credentials and issue a session token
    ///
    /// Unknown usernames and wrong passwords fail identically, and both paths
    /// run one password verification so neither is measurably faster.
    /// Password verification runs on the blocking thread pool.
    pub async fn login(
        stores: &Stores,
        jwt_service: &JwtService,
        username: &str,
        password: &SecretString,
    ) -> Result<TokenResponse, ApiError> {
        let password = password.expose_secret().clone();

        let Some(account) = stores.user_accounts.get_by_username(username).await? else {
            PasswordService::verify_dummy_async(password).await;
            debug!(username, "Login failed: unknown user");
            return Err(AuthError::UserNotFound.into());
        };

        let valid = PasswordService::verify_async(password, account.password_hash).await?;
        if !valid {
            debug!(username, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let access_token = jwt_service.issue(&account.username)?;
        info!(username = %account.username, "Session token issued");

        Ok(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_service.access_token_expiry_secs(),
        })
    }
}
