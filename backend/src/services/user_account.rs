//! User account registration and lookup

use crate::access;
use crate::auth::PasswordService;
use crate::error::ApiError;
use crate::repositories::Stores;
use moneybags_shared::validation::{validate_email, validate_password, validate_username};
use moneybags_shared::{CreateUserAccountRequest, UserAccount, UserAccountResponse};
use secrecy::ExposeSecret;
use tracing::info;
use uuid::Uuid;

pub struct UserAccountService;

impl UserAccountService {
    /// Register a new user account
    ///
    /// Input is validated before anything is hashed. Password hashing is
    /// offloaded to the blocking thread pool.
    pub async fn register(
        stores: &Stores,
        req: CreateUserAccountRequest,
    ) -> Result<UserAccountResponse, ApiError> {
        let username = req.username;
        validate_username(&username)?;
        validate_password(req.password.expose_secret())?;

        let email = match req.email.map(|e| e.trim().to_string()) {
            Some(e) if e.is_empty() => None,
            Some(e) => {
                validate_email(&e)?;
                Some(e)
            }
            None => None,
        };

        if stores.user_accounts.exists_by_username(&username).await? {
            return Err(ApiError::Conflict("Username already taken".to_string()));
        }

        let password_hash =
            PasswordService::hash_async(req.password.expose_secret().clone()).await?;

        let account = UserAccount {
            id: Uuid::new_v4().to_string(),
            username,
            password_hash,
            email,
        };

        if let Err(e) = stores.user_accounts.create(&account).await {
            // Lost a race with a concurrent registration of the same name
            if stores
                .user_accounts
                .exists_by_username(&account.username)
                .await?
            {
                return Err(ApiError::Conflict("Username already taken".to_string()));
            }
            return Err(e.into());
        }

        info!(user_account_id = %account.id, username = %account.username, "User account created");
        Ok(account.into())
    }

    /// The authenticated user's own account
    pub async fn get_current(
        stores: &Stores,
        username: &str,
    ) -> Result<UserAccountResponse, ApiError> {
        let authorized = access::authorize_user(stores, username).await?;
        Ok(authorized.user_account.into())
    }
}
