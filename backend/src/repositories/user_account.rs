//! User account repository for database operations

use anyhow::Result;
use async_trait::async_trait;
use moneybags_shared::UserAccount;
use sqlx::PgPool;

use super::UserAccountStore;

/// User account record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserAccountRecord {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
}

impl From<UserAccountRecord> for UserAccount {
    fn from(record: UserAccountRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            password_hash: record.password_hash,
            email: record.email,
        }
    }
}

/// Postgres-backed user account store
#[derive(Clone)]
pub struct PgUserAccountRepository {
    pool: PgPool,
}

impl PgUserAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserAccountStore for PgUserAccountRepository {
    async fn exists_by_id(&self, id: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM user_accounts WHERE id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM user_accounts WHERE username = $1)
            "#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<UserAccount>> {
        let record = sqlx::query_as::<_, UserAccountRecord>(
            r#"
            SELECT id, username, password_hash, email
            FROM user_accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<UserAccount>> {
        let record = sqlx::query_as::<_, UserAccountRecord>(
            r#"
            SELECT id, username, password_hash, email
            FROM user_accounts
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    async fn create(&self, account: &UserAccount) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_accounts (id, username, password_hash, email)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&account.id)
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(&account.email)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() != 1 {
            anyhow::bail!("Failed to create user account: unexpected number of rows affected");
        }

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        crate::db::health_check(&self.pool).await
    }
}
