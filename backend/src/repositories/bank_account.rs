//! Bank account repository for database operations

use anyhow::Result;
use async_trait::async_trait;
use moneybags_shared::BankAccount;
use sqlx::PgPool;

use super::{BankAccountStore, ResourceStore};

/// Bank account record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BankAccountRecord {
    pub id: String,
    pub budget_id: String,
    pub name: String,
}

impl From<BankAccountRecord> for BankAccount {
    fn from(record: BankAccountRecord) -> Self {
        Self {
            id: record.id,
            budget_id: record.budget_id,
            name: record.name,
        }
    }
}

/// Postgres-backed bank account store
#[derive(Clone)]
pub struct PgBankAccountRepository {
    pool: PgPool,
}

impl PgBankAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore for PgBankAccountRepository {
    async fn exists_by_id(&self, id: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM bank_accounts WHERE id = $1)
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
            SELECT budget_id FROM bank_accounts WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(owner)
    }
}

#[async_trait]
impl BankAccountStore for PgBankAccountRepository {
    async fn get_by_id(&self, id: &str) -> Result<Option<BankAccount>> {
        let record = sqlx::query_as::<_, BankAccountRecord>(
            r#"
            SELECT id, budget_id, name
            FROM bank_accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    async fn list_by_budget_id(&self, budget_id: &str) -> Result<Vec<BankAccount>> {
        let records = sqlx::query_as::<_, BankAccountRecord>(
            r#"
            SELECT id, budget_id, name
            FROM bank_accounts
            WHERE budget_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(budget_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn exists_by_budget_id_and_name(&self, budget_id: &str, name: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bank_accounts
                WHERE budget_id = $1 AND name = $2
            )
            "#,
        )
        .bind(budget_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create(&self, bank_account: &BankAccount) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO bank_accounts (id, budget_id, name)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&bank_account.id)
        .bind(&bank_account.budget_id)
        .bind(&bank_account.name)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() != 1 {
            anyhow::bail!("Failed to create bank account: unexpected number of rows affected");
        }

        Ok(())
    }
}
