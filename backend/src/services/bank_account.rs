//! Bank accounts, reachable only through a budget the user owns

use crate::access::{self, AccessError, ResourceKind};
use crate::error::ApiError;
use crate::repositories::Stores;
use moneybags_shared::validation::validate_name;
use moneybags_shared::{BankAccount, BankAccountResponse, BankAccountsListResponse};
use tracing::info;
use uuid::Uuid;

pub struct BankAccountService;

impl BankAccountService {
    pub async fn list(
        stores: &Stores,
        username: &str,
        budget_id: &str,
    ) -> Result<BankAccountsListResponse, ApiError> {
        access::authorize_budget(stores, username, budget_id).await?;

        let accounts = stores.bank_accounts.list_by_budget_id(budget_id).await?;

        Ok(BankAccountsListResponse {
            bank_accounts: accounts.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn create(
        stores: &Stores,
        username: &str,
        budget_id: &str,
        name: &str,
    ) -> Result<BankAccountResponse, ApiError> {
        access::authorize_budget(stores, username, budget_id).await?;

        let name = name.trim();
        validate_name(name)?;

        if stores
            .bank_accounts
            .exists_by_budget_id_and_name(budget_id, name)
            .await?
        {
            return Err(duplicate_bank_account(name));
        }

        let account = BankAccount {
            id: Uuid::new_v4().to_string(),
            budget_id: budget_id.to_string(),
            name: name.to_string(),
        };

        if let Err(e) = stores.bank_accounts.create(&account).await {
            // Lost a race with a concurrent create of the same name
            if stores
                .bank_accounts
                .exists_by_budget_id_and_name(budget_id, name)
                .await?
            {
                return Err(duplicate_bank_account(name));
            }
            return Err(e.into());
        }

        info!(bank_account_id = %account.id, budget_id, "Bank account created");
        Ok(account.into())
    }

    pub async fn get(
        stores: &Stores,
        username: &str,
        budget_id: &str,
        bank_account_id: &str,
    ) -> Result<BankAccountResponse, ApiError> {
        access::authorize_bank_account(stores, username, budget_id, bank_account_id).await?;

        let account = stores
            .bank_accounts
            .get_by_id(bank_account_id)
            .await?
            .ok_or_else(|| AccessError::NotFound {
                kind: ResourceKind::BankAccount,
                id: bank_account_id.to_string(),
            })?;

        Ok(account.into())
    }
}

fn duplicate_bank_account(name: &str) -> ApiError {
    ApiError::Conflict(format!(
        "Bank account '{}' already exists in this budget",
        name
    ))
}
