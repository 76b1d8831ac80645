//! Ownership authorization
//!
//! Every protected resource hangs off the authenticated user through a chain
//! of owner references: user account -> budget -> bank account. A request is
//! authorized only when every link of the chain matches.

mod chain;

pub use chain::OwnershipChain;

use moneybags_shared::UserAccount;
use std::fmt;
use thiserror::Error;

use crate::repositories::Stores;

/// A level of the ownership hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    UserAccount,
    Budget,
    BankAccount,
}

impl ResourceKind {
    /// Human readable name used in error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceKind::UserAccount => "User account",
            ResourceKind::Budget => "Budget",
            ResourceKind::BankAccount => "Bank account",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Outcome of a failed ownership check
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("{kind} does not exist")]
    NotFound { kind: ResourceKind, id: String },

    #[error("{kind} does not belong to user")]
    Forbidden { kind: ResourceKind, id: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// A fully verified ownership path
#[derive(Debug, Clone)]
pub struct Authorized {
    pub user_account: UserAccount,
    /// Verified levels below the user account, outermost first
    pub path: Vec<(ResourceKind, String)>,
}

impl Authorized {
    /// Id of the innermost verified resource
    pub fn target_id(&self) -> Option<&str> {
        self.path.last().map(|(_, id)| id.as_str())
    }
}

/// Resolve the authenticated user's own account
pub async fn authorize_user(stores: &Stores, username: &str) -> Result<Authorized, AccessError> {
    Ok(OwnershipChain::start(&*stores.user_accounts, username)
        .await?
        .authorize())
}

/// Verify `budget_id` exists and belongs to `username`
pub async fn authorize_budget(
    stores: &Stores,
    username: &str,
    budget_id: &str,
) -> Result<Authorized, AccessError> {
    Ok(OwnershipChain::start(&*stores.user_accounts, username)
        .await?
        .descend(ResourceKind::Budget, &*stores.budgets, budget_id)
        .await?
        .authorize())
}

/// Verify the full user -> budget -> bank account path
pub async fn authorize_bank_account(
    stores: &Stores,
    username: &str,
    budget_id: &str,
    bank_account_id: &str,
) -> Result<Authorized, AccessError> {
    Ok(OwnershipChain::start(&*stores.user_accounts, username)
        .await?
        .descend(ResourceKind::Budget, &*stores.budgets, budget_id)
        .await?
        .descend(ResourceKind::BankAccount, &*stores.bank_accounts, bank_account_id)
        .await?
        .authorize())
}
