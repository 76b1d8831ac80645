//! Budget repository for database operations

use anyhow::Result;
use async_trait::async_trait;
use moneybags_shared::Budget;
use sqlx::PgPool;

use super::{BudgetStore, ResourceStore};

/// Budget record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BudgetRecord {
    pub id: String,
    pub user_account_id: String,
    pub name: String,
}

impl From<BudgetRecord> for Budget {
    fn from(record: BudgetRecord) -> Self {
        Self {
            id: record.id,
            user_account_id: record.user_account_id,
            name: record.name,
        }
    }
}

/// Postgres-backed budget store
#[derive(Clone)]
pub struct PgBudgetRepository {
    pool: PgPool,
}

impl PgBudgetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore for PgBudgetRepository {
    async fn exists_by_id(&self, id: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM budgets WHERE id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn owner_id(&self, id: &str) -> Result<Option<String>> {
        let owner = sqlx::query_scalar::<_, String>(
            r#"
            SELECT user_account_id FROM budgets WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(owner)
    }
}

#[async_trait]
impl BudgetStore for PgBudgetRepository {
    async fn get_by_id(&self, id: &str) -> Result<Option<Budget>> {
        let record = sqlx::query_as::<_, BudgetRecord>(
            r#"
            SELECT id, user_account_id, name
            FROM budgets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    async fn list_by_user_account_id(&self, user_account_id: &str) -> Result<Vec<Budget>> {
        let records = sqlx::query_as::<_, BudgetRecord>(
            r#"
            SELECT id, user_account_id, name
            FROM budgets
            WHERE user_account_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(user_account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn exists_by_user_account_id_and_name(
        &self,
        user_account_id: &str,
        name: &str,
    ) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM budgets
                WHERE user_account_id = $1 AND name = $2
            )
            "#,
        )
        .bind(user_account_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create(&self, budget: &Budget) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO budgets (id, user_account_id, name)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&budget.id)
        .bind(&budget.user_account_id)
        .bind(&budget.name)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() != 1 {
            anyhow::bail!("Failed to create budget: unexpected number of rows affected");
        }

        Ok(())
    }
}
