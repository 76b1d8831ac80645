//! Generic hierarchical resolver
//!
//! Walks the ownership hierarchy top-down from the authenticated identity.
//! Each level is checked in a fixed order:
//!
//! ```text
//! Start -> CheckExists(level) -> NotFound
//!                             -> CheckOwner(level) -> Forbidden
//!                                                  -> NextLevel(level + 1) -> ... -> Authorized
//! ```
//!
//! Existence is always decided before ownership, so a missing id reads as
//! 404 and an id owned by someone else reads as 403.

use moneybags_shared::UserAccount;
use tracing::debug;

use super::{AccessError, Authorized, ResourceKind};
use crate::repositories::{ResourceStore, UserAccountStore};

/// An ownership chain that has passed every level so far
#[derive(Debug, Clone)]
pub struct OwnershipChain {
    user_account: UserAccount,
    path: Vec<(ResourceKind, String)>,
}

impl OwnershipChain {
    /// Resolve the root level: the authenticated username to its account
    pub async fn start<S>(store: &S, username: &str) -> Result<Self, AccessError>
    where
        S: UserAccountStore + ?Sized,
    {
        if !store.exists_by_username(username).await? {
            debug!(username, "Authenticated user no longer exists");
            return Err(AccessError::NotFound {
                kind: ResourceKind::UserAccount,
                id: username.to_string(),
            });
        }

        // Deleted between the two reads
        let user_account = store
            .get_by_username(username)
            .await?
            .ok_or_else(|| AccessError::NotFound {
                kind: ResourceKind::UserAccount,
                id: username.to_string(),
            })?;

        Ok(Self {
            user_account,
            path: Vec::new(),
        })
    }

    /// Id every candidate at the next level must be owned by
    fn parent_id(&self) -> &str {
        self.path
            .last()
            .map(|(_, id)| id.as_str())
            .unwrap_or(self.user_account.id.as_str())
    }

    /// Check one more level: `id` must exist in `store` and be owned by
    /// the previous level
    pub async fn descend<S>(
        mut self,
        kind: ResourceKind,
        store: &S,
        id: &str,
    ) -> Result<Self, AccessError>
    where
        S: ResourceStore + ?Sized,
    {
        if !store.exists_by_id(id).await? {
            debug!(%kind, id, "Access denied: resource does not exist");
            return Err(AccessError::NotFound {
                kind,
                id: id.to_string(),
            });
        }

        match store.owner_id(id).await? {
            // Deleted between the two reads
            None => {
                return Err(AccessError::NotFound {
                    kind,
                    id: id.to_string(),
                })
            }
            Some(owner_id) if owner_id != self.parent_id() => {
                debug!(
                    %kind,
                    id,
                    username = %self.user_account.username,
                    "Access denied: resource not owned by requester"
                );
                return Err(AccessError::Forbidden {
                    kind,
                    id: id.to_string(),
                });
            }
            Some(_) => {}
        }

        self.path.push((kind, id.to_string()));
        Ok(self)
    }

    /// Every level passed
    pub fn authorize(self) -> Authorized {
        Authorized {
            user_account: self.user_account,
            path: self.path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::Stores;
    use crate::testing::{seed_ownership_fixture, OwnershipFixture};
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Resource store that counts lookups and can simulate a concurrent delete
    struct RecordingStore {
        exists: bool,
        owner: Option<String>,
        exists_calls: AtomicUsize,
        owner_calls: AtomicUsize,
    }

    impl RecordingStore {
        fn new(exists: bool, owner: Option<&str>) -> Self {
            Self {
                exists,
                owner: owner.map(str::to_string),
                exists_calls: AtomicUsize::new(0),
                owner_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ResourceStore for RecordingStore {
        async fn exists_by_id(&self, _id: &str) -> Result<bool> {
            self.exists_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.exists)
        }

        async fn owner_id(&self, _id: &str) -> Result<Option<String>> {
            self.owner_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.owner.clone())
        }
    }

    /// Resource store whose backend is down
    struct FailingStore;

    #[async_trait]
    impl ResourceStore for FailingStore {
        async fn exists_by_id(&self, _id: &str) -> Result<bool> {
            anyhow::bail!("connection refused")
        }

        async fn owner_id(&self, _id: &str) -> Result<Option<String>> {
            anyhow::bail!("connection refused")
        }
    }

    async fn fixture() -> (Stores, OwnershipFixture) {
        let stores = Stores::memory();
        let fixture = seed_ownership_fixture(&stores).await;
        (stores, fixture)
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let (stores, _) = fixture().await;

        let result = OwnershipChain::start(&*stores.user_accounts, "mallory").await;

        assert!(matches!(
            result,
            Err(AccessError::NotFound { kind: ResourceKind::UserAccount, .. })
        ));
    }

    #[tokio::test]
    async fn test_root_only_chain_authorizes_user() {
        let (stores, fixture) = fixture().await;

        let authorized = OwnershipChain::start(&*stores.user_accounts, "alice")
            .await
            .unwrap()
            .authorize();

        assert_eq!(authorized.user_account.id, fixture.alice_id);
        assert!(authorized.path.is_empty());
    }

    #[tokio::test]
    async fn test_existence_checked_before_ownership() {
        let (stores, _) = fixture().await;
        let store = RecordingStore::new(false, Some("someone-else"));

        let result = OwnershipChain::start(&*stores.user_accounts, "alice")
            .await
            .unwrap()
            .descend(ResourceKind::Budget, &store, "b-x")
            .await;

        assert!(matches!(result, Err(AccessError::NotFound { .. })));
        assert_eq!(store.exists_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.owner_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_owner_vanishing_between_reads_is_not_found() {
        let (stores, _) = fixture().await;
        let store = RecordingStore::new(true, None);

        let result = OwnershipChain::start(&*stores.user_accounts, "alice")
            .await
            .unwrap()
            .descend(ResourceKind::Budget, &store, "b-x")
            .await;

        assert!(matches!(
            result,
            Err(AccessError::NotFound { kind: ResourceKind::Budget, .. })
        ));
        assert_eq!(store.owner_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_ownership_compared_against_previous_level() {
        let (stores, fixture) = fixture().await;
        // Claims to be owned by alice's account id, but sits below a budget level
        let store = RecordingStore::new(true, Some(&fixture.alice_id));

        let result = OwnershipChain::start(&*stores.user_accounts, "alice")
            .await
            .unwrap()
            .descend(ResourceKind::Budget, &*stores.budgets, &fixture.alice_budget_id)
            .await
            .unwrap()
            .descend(ResourceKind::BankAccount, &store, "ba-x")
            .await;

        assert!(matches!(
            result,
            Err(AccessError::Forbidden { kind: ResourceKind::BankAccount, .. })
        ));
    }

    #[tokio::test]
    async fn test_store_failure_is_internal() {
        let (stores, _) = fixture().await;

        let result = OwnershipChain::start(&*stores.user_accounts, "alice")
            .await
            .unwrap()
            .descend(ResourceKind::Budget, &FailingStore, "b-x")
            .await;

        assert!(matches!(result, Err(AccessError::Internal(_))));
    }

    #[tokio::test]
    async fn test_full_path_recorded() {
        let (stores, fixture) = fixture().await;

        let authorized = OwnershipChain::start(&*stores.user_accounts, "alice")
            .await
            .unwrap()
            .descend(ResourceKind::Budget, &*stores.budgets, &fixture.alice_budget_id)
            .await
            .unwrap()
            .descend(
                ResourceKind::BankAccount,
                &*stores.bank_accounts,
                &fixture.alice_bank_account_id,
            )
            .await
            .unwrap()
            .authorize();

        assert_eq!(
            authorized.path,
            vec![
                (ResourceKind::Budget, fixture.alice_budget_id.clone()),
                (ResourceKind::BankAccount, fixture.alice_bank_account_id.clone()),
            ]
        );
        assert_eq!(authorized.target_id(), Some(fixture.alice_bank_account_id.as_str()));
    }
}
