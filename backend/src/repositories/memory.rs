//! In-memory stores
//!
//! Backs every store trait with plain vectors behind one shared lock. Owner
//! references are checked on insert the same way the Postgres foreign keys
//! check them, so a dangling owner can never be stored.

use anyhow::Result;
use async_trait::async_trait;
use moneybags_shared::{BankAccount, Budget, UserAccount};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{BankAccountStore, BudgetStore, ResourceStore, Stores, UserAccountStore};

#[derive(Debug, Default)]
struct MemoryData {
    user_accounts: Vec<UserAccount>,
    budgets: Vec<Budget>,
    bank_accounts: Vec<BankAccount>,
}

/// Shared in-memory data set
#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<MemoryData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store handles that all read and write this data set
    pub fn stores(&self) -> Stores {
        Stores {
            user_accounts: Arc::new(MemoryUserAccounts(self.clone())),
            budgets: Arc::new(MemoryBudgets(self.clone())),
            bank_accounts: Arc::new(MemoryBankAccounts(self.clone())),
        }
    }
}

/// In-memory user account store
pub struct MemoryUserAccounts(MemoryStore);

/// In-memory budget store
pub struct MemoryBudgets(MemoryStore);

/// In-memory bank account store
pub struct MemoryBankAccounts(MemoryStore);

#[async_trait]
impl UserAccountStore for MemoryUserAccounts {
    async fn exists_by_id(&self, id: &str) -> Result<bool> {
        let data = self.0.data.read().await;
        Ok(data.user_accounts.iter().any(|a| a.id == id))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool> {
        let data = self.0.data.read().await;
        Ok(data.user_accounts.iter().any(|a| a.username == username))
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<UserAccount>> {
        let data = self.0.data.read().await;
        Ok(data.user_accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<UserAccount>> {
        let data = self.0.data.read().await;
        Ok(data
            .user_accounts
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn create(&self, account: &UserAccount) -> Result<()> {
        let mut data = self.0.data.write().await;
        if data
            .user_accounts
            .iter()
            .any(|a| a.id == account.id || a.username == account.username)
        {
            anyhow::bail!("Failed to create user account: duplicate id or username");
        }
        data.user_accounts.push(account.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl ResourceStore for MemoryBudgets {
    async fn exists_by_id(&self, id: &str) -> Result<bool> {
        let data = self.0.data.read().await;
        Ok(data.budgets.iter().any(|b| b.id == id))
    }

    async fn owner_id(&self, id: &str) -> Result<Option<String>> {
        let data = self.0.data.read().await;
        Ok(data
            .budgets
            .iter()
            .find(|b| b.id == id)
            .map(|b| b.user_account_id.clone()))
    }
}

#[async_trait]
impl BudgetStore for MemoryBudgets {
    async fn get_by_id(&self, id: &str) -> Result<Option<Budget>> {
        let data = self.0.data.read().await;
        Ok(data.budgets.iter().find(|b| b.id == id).cloned())
    }

    async fn list_by_user_account_id(&self, user_account_id: &str) -> Result<Vec<Budget>> {
        let data = self.0.data.read().await;
        Ok(data
            .budgets
            .iter()
            .filter(|b| b.user_account_id == user_account_id)
            .cloned()
            .collect())
    }

    async fn exists_by_user_account_id_and_name(
        &self,
        user_account_id: &str,
        name: &str,
    ) -> Result<bool> {
        let data = self.0.data.read().await;
        Ok(data
            .budgets
            .iter()
            .any(|b| b.user_account_id == user_account_id && b.name == name))
    }

    async fn create(&self, budget: &Budget) -> Result<()> {
        let mut data = self.0.data.write().await;
        if !data
            .user_accounts
            .iter()
            .any(|a| a.id == budget.user_account_id)
        {
            anyhow::bail!(
                "Failed to create budget: owner {} does not exist",
                budget.user_account_id
            );
        }
        if data.budgets.iter().any(|b| {
            b.id == budget.id
                || (b.user_account_id == budget.user_account_id && b.name == budget.name)
        }) {
            anyhow::bail!("Failed to create budget: duplicate id or name");
        }
        data.budgets.push(budget.clone());
        Ok(())
    }
}

#[async_trait]
impl ResourceStore for MemoryBankAccounts {
    async fn exists_by_id(&self, id: &str) -> Result<bool> {
        let data = self.0.data.read().await;
        Ok(data.bank_accounts.iter().any(|a| a.id == id))
    }

    async fn owner_id(&self, id: &str) -> Result<Option<String>> {
        let data = self.0.data.read().await;
        Ok(data
            .bank_accounts
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.budget_id.clone()))
    }
}

#[async_trait]
impl BankAccountStore for MemoryBankAccounts {
    async fn get_by_id(&self, id: &str) -> Result<Option<BankAccount>> {
        let data = self.0.data.read().await;
        Ok(data.bank_accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn list_by_budget_id(&self, budget_id: &str) -> Result<Vec<BankAccount>> {
        let data = self.0.data.read().await;
        Ok(data
            .bank_accounts
            .iter()
            .filter(|a| a.budget_id == budget_id)
            .cloned()
            .collect())
    }

    async fn exists_by_budget_id_and_name(&self, budget_id: &str, name: &str) -> Result<bool> {
        let data = self.0.data.read().await;
        Ok(data
            .bank_accounts
            .iter()
            .any(|a| a.budget_id == budget_id && a.name == name))
    }

    async fn create(&self, bank_account: &BankAccount) -> Result<()> {
        let mut data = self.0.data.write().await;
        if !data.budgets.iter().any(|b| b.id == bank_account.budget_id) {
            anyhow::bail!(
                "Failed to create bank account: owner {} does not exist",
                bank_account.budget_id
            );
        }
        if data.bank_accounts.iter().any(|a| {
            a.id == bank_account.id
                || (a.budget_id == bank_account.budget_id && a.name == bank_account.name)
        }) {
            anyhow::bail!("Failed to create bank account: duplicate id or name");
        }
        data.bank_accounts.push(bank_account.clone());
        Ok(())
    }
}
