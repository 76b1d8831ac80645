//! Budgets owned by the authenticated user

use crate::access::{self, AccessError, ResourceKind};
use crate::error::ApiError;
use crate::repositories::Stores;
use moneybags_shared::validation::validate_name;
use moneybags_shared::{Budget, BudgetResponse, BudgetsListResponse};
use tracing::info;
use uuid::Uuid;

pub struct BudgetService;

impl BudgetService {
    /// Every budget the user owns, oldest first
    pub async fn list(stores: &Stores, username: &str) -> Result<BudgetsListResponse, ApiError> {
        let authorized = access::authorize_user(stores, username).await?;

        let budgets = stores
            .budgets
            .list_by_user_account_id(&authorized.user_account.id)
            .await?;

        Ok(BudgetsListResponse {
            budgets: budgets.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn create(
        stores: &Stores,
        username: &str,
        name: &str,
    ) -> Result<BudgetResponse, ApiError> {
        let name = name.trim();
        validate_name(name)?;

        let authorized = access::authorize_user(stores, username).await?;
        let owner_id = authorized.user_account.id;

        if stores
            .budgets
            .exists_by_user_account_id_and_name(&owner_id, name)
            .await?
        {
            return Err(duplicate_budget(name));
        }

        let budget = Budget {
            id: Uuid::new_v4().to_string(),
            user_account_id: owner_id,
            name: name.to_string(),
        };

        if let Err(e) = stores.budgets.create(&budget).await {
            // Lost a race with a concurrent create of the same name
            if stores
                .budgets
                .exists_by_user_account_id_and_name(&budget.user_account_id, name)
                .await?
            {
                return Err(duplicate_budget(name));
            }
            return Err(e.into());
        }

        info!(budget_id = %budget.id, username, "Budget created");
        Ok(budget.into())
    }

    /// A single budget, after the ownership chain has approved it
    pub async fn get(
        stores: &Stores,
        username: &str,
        budget_id: &str,
    ) -> Result<BudgetResponse, ApiError> {
        access::authorize_budget(stores, username, budget_id).await?;

        // Deleted after authorization
        let budget = stores
            .budgets
            .get_by_id(budget_id)
            .await?
            .ok_or_else(|| AccessError::NotFound {
                kind: ResourceKind::Budget,
                id: budget_id.to_string(),
            })?;

        Ok(budget.into())
    }
}

fn duplicate_budget(name: &str) -> ApiError {
    ApiError::Conflict(format!("Budget '{}' already exists", name))
}
