//! API request and response types

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::models::{BankAccount, Budget, UserAccount};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Authentication Types
// ============================================================================

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: SecretString,
}

/// Session token response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

// ============================================================================
// User Account Types
// ============================================================================

/// Registration request
#[derive(Debug, Deserialize)]
pub struct CreateUserAccountRequest {
    pub username: String,
    pub password: SecretString,
    #[serde(default)]
    pub email: Option<String>,
}

/// User account as returned to its owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccountResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<UserAccount> for UserAccountResponse {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
        }
    }
}

// ============================================================================
// Budget Types
// ============================================================================

/// Create budget request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBudgetRequest {
    pub name: String,
}

/// Budget response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetResponse {
    pub id: String,
    pub name: String,
}

impl From<Budget> for BudgetResponse {
    fn from(budget: Budget) -> Self {
        Self {
            id: budget.id,
            name: budget.name,
        }
    }
}

/// Budgets list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetsListResponse {
    pub budgets: Vec<BudgetResponse>,
}

// ============================================================================
// Bank Account Types
// ============================================================================

/// Create bank account request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBankAccountRequest {
    pub name: String,
}

/// Bank account response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccountResponse {
    pub id: String,
    pub name: String,
}

impl From<BankAccount> for BankAccountResponse {
    fn from(account: BankAccount) -> Self {
        Self {
            id: account.id,
            name: account.name,
        }
    }
}

/// Bank accounts list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccountsListResponse {
    pub bank_accounts: Vec<BankAccountResponse>,
}
