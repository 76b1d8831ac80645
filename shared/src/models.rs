//! Data models for the Moneybags application
//!
//! Ownership runs `UserAccount 1-* Budget 1-* BankAccount`. Every owned
//! model carries the id of its direct owner.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User account (the authenticated identity)
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserAccount {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: Option<String>,
}

impl fmt::Debug for UserAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAccount")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("email", &self.email)
            .finish()
    }
}

/// Budget, owned directly by a user account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Budget {
    pub id: String,
    pub user_account_id: String,
    pub name: String,
}

/// Bank account, owned by a budget (and through it, by a user account)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BankAccount {
    pub id: String,
    pub budget_id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> UserAccount {
        UserAccount {
            id: "ua-1".to_string(),
            username: "alice".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            email: None,
        }
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let json = serde_json::to_string(&account()).unwrap();
        assert!(json.contains("alice"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
    }

    #[test]
    fn test_password_hash_redacted_in_debug() {
        let debug = format!("{:?}", account());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("argon2id"));
    }
}
