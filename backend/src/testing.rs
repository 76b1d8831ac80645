//! Shared helpers for unit tests

use jsonwebtoken::Algorithm;
use moneybags_shared::{BankAccount, Budget, UserAccount};
use std::sync::Arc;

use crate::auth::{JwtKeys, JwtService};
use crate::config::{AppConfig, StoreBackend};
use crate::repositories::Stores;
use crate::state::AppState;

pub const TEST_PRIVATE_KEY: &str = include_str!("../tests/fixtures/jwt_signing_key.pem");
pub const TEST_PUBLIC_KEY: &str = include_str!("../tests/fixtures/jwt_signing_key.pub.pem");
pub const FOREIGN_PRIVATE_KEY: &str = include_str!("../tests/fixtures/foreign_signing_key.pem");
pub const FOREIGN_PUBLIC_KEY: &str = include_str!("../tests/fixtures/foreign_signing_key.pub.pem");

pub const TEST_ISSUER: &str = "moneybags";

pub fn test_jwt_keys() -> JwtKeys {
    JwtKeys::from_rsa_pem(TEST_PRIVATE_KEY.as_bytes(), TEST_PUBLIC_KEY.as_bytes()).unwrap()
}

pub fn test_jwt_service() -> JwtService {
    JwtService::new(test_jwt_keys(), Algorithm::PS256, TEST_ISSUER, 3600)
}

/// Same issuer and algorithm, different key pair
pub fn foreign_jwt_service() -> JwtService {
    let keys =
        JwtKeys::from_rsa_pem(FOREIGN_PRIVATE_KEY.as_bytes(), FOREIGN_PUBLIC_KEY.as_bytes())
            .unwrap();
    JwtService::new(keys, Algorithm::PS256, TEST_ISSUER, 3600)
}

/// App state over empty in-memory stores
pub fn test_state() -> AppState {
    let mut config = AppConfig::default();
    config.database.backend = StoreBackend::Memory;
    AppState::new(Stores::memory(), Arc::new(config), test_jwt_service())
}

/// Ids created by [`seed_ownership_fixture`]
#[derive(Debug, Clone)]
pub struct OwnershipFixture {
    pub alice_id: String,
    pub alice_budget_id: String,
    pub alice_second_budget_id: String,
    pub alice_bank_account_id: String,
    pub bob_id: String,
    pub bob_budget_id: String,
    pub bob_bank_account_id: String,
}

/// alice owns two budgets with one bank account under the first; bob owns
/// one budget with one bank account
pub async fn seed_ownership_fixture(stores: &Stores) -> OwnershipFixture {
    let fixture = OwnershipFixture {
        alice_id: "ua-alice".to_string(),
        alice_budget_id: "b-alice-home".to_string(),
        alice_second_budget_id: "b-alice-travel".to_string(),
        alice_bank_account_id: "ba-alice-checking".to_string(),
        bob_id: "ua-bob".to_string(),
        bob_budget_id: "b-bob-home".to_string(),
        bob_bank_account_id: "ba-bob-checking".to_string(),
    };

    for (id, username) in [(&fixture.alice_id, "alice"), (&fixture.bob_id, "bob")] {
        stores
            .user_accounts
            .create(&UserAccount {
                id: id.clone(),
                username: username.to_string(),
                password_hash: "unused".to_string(),
                email: None,
            })
            .await
            .unwrap();
    }

    for (id, owner, name) in [
        (&fixture.alice_budget_id, &fixture.alice_id, "Home"),
        (&fixture.alice_second_budget_id, &fixture.alice_id, "Travel"),
        (&fixture.bob_budget_id, &fixture.bob_id, "Home"),
    ] {
        stores
            .budgets
            .create(&Budget {
                id: id.clone(),
                user_account_id: owner.clone(),
                name: name.to_string(),
            })
            .await
            .unwrap();
    }

    for (id, budget_id) in [
        (&fixture.alice_bank_account_id, &fixture.alice_budget_id),
        (&fixture.bob_bank_account_id, &fixture.bob_budget_id),
    ] {
        stores
            .bank_accounts
            .create(&BankAccount {
                id: id.clone(),
                budget_id: budget_id.clone(),
                name: "Checking".to_string(),
            })
            .await
            .unwrap();
    }

    fixture
}
