//! Data access layer
//!
//! Store traits abstract persistence so the authorization chain and the
//! services never depend on Postgres directly:
//! - `Pg*Repository` types back them with `sqlx`
//! - `memory` backs them with in-process maps (tests, local runs)

use anyhow::Result;
use async_trait::async_trait;
use moneybags_shared::{BankAccount, Budget, UserAccount};
use sqlx::PgPool;
use std::sync::Arc;

pub mod bank_account;
pub mod budget;
pub mod memory;
pub mod user_account;

pub use bank_account::PgBankAccountRepository;
pub use budget::PgBudgetRepository;
pub use memory::MemoryStore;
pub use user_account::PgUserAccountRepository;

// ============================================================================
// Identity store
// ============================================================================

/// Store for user accounts (the authenticated identities)
#[async_trait]
pub trait UserAccountStore: Send + Sync {
    async fn exists_by_id(&self, id: &str) -> Result<bool>;

    /// Usernames match case-sensitively
    async fn exists_by_username(&self, username: &str) -> Result<bool>;

    async fn get_by_id(&self, id: &str) -> Result<Option<UserAccount>>;

    async fn get_by_username(&self, username: &str) -> Result<Option<UserAccount>>;

    async fn create(&self, account: &UserAccount) -> Result<()>;

    /// Check the backing store is reachable
    async fn ping(&self) -> Result<()>;
}

// ============================================================================
// Owned resource stores
// ============================================================================

/// The two lookups the ownership chain needs from any owned resource type
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn exists_by_id(&self, id: &str) -> Result<bool>;

    /// Id of the direct owner, `None` if the resource does not exist
    async fn owner_id(&self, id: &str) -> Result<Option<String>>;
}

/// Budgets, owned by user accounts
#[async_trait]
pub trait BudgetStore: ResourceStore {
    async fn get_by_id(&self, id: &str) -> Result<Option<Budget>>;

    async fn list_by_user_account_id(&self, user_account_id: &str) -> Result<Vec<Budget>>;

    async fn exists_by_user_account_id_and_name(
        &self,
        user_account_id: &str,
        name: &str,
    ) -> Result<bool>;

    async fn create(&self, budget: &Budget) -> Result<()>;
}

/// Bank accounts, owned by budgets
#[async_trait]
pub trait BankAccountStore: ResourceStore {
    async fn get_by_id(&self, id: &str) -> Result<Option<BankAccount>>;

    async fn list_by_budget_id(&self, budget_id: &str) -> Result<Vec<BankAccount>>;

    async fn exists_by_budget_id_and_name(&self, budget_id: &str, name: &str) -> Result<bool>;

    async fn create(&self, bank_account: &BankAccount) -> Result<()>;
}

/// Handles to every store, cheap to clone
#[derive(Clone)]
pub struct Stores {
    pub user_accounts: Arc<dyn UserAccountStore>,
    pub budgets: Arc<dyn BudgetStore>,
    pub bank_accounts: Arc<dyn BankAccountStore>,
}

impl Stores {
    /// Postgres-backed stores sharing one pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            user_accounts: Arc::new(PgUserAccountRepository::new(pool.clone())),
            budgets: Arc::new(PgBudgetRepository::new(pool.clone())),
            bank_accounts: Arc::new(PgBankAccountRepository::new(pool)),
        }
    }

    /// Fresh, empty in-memory stores
    pub fn memory() -> Self {
        MemoryStore::new().stores()
    }
}
