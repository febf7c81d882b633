use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::account::{errors::RepositoryError, types::Account};
use crate::context::RequestContext;

use super::traits::AccountRepository;

type BindingKey = (String, String);

#[derive(Default)]
struct MemoryState {
    accounts: HashMap<String, Account>,
    /// (method, external id) -> account id
    bindings: HashMap<BindingKey, String>,
}

/// In-process [`AccountRepository`] backed by hash maps
///
/// Enforces the (method, external id) uniqueness index on both create and
/// update. Suitable for tests, demos and single-instance deployments; state is
/// lost on drop.
#[derive(Default)]
pub struct InMemoryAccountStore {
    state: Mutex<MemoryState>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory account store");
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.state.lock().await.accounts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn binding_keys(account: &Account) -> impl Iterator<Item = BindingKey> + '_ {
        account
            .auth_data
            .iter()
            .map(|(method, record)| (method.clone(), record.external_id.clone()))
    }
}

impl MemoryState {
    /// Fail if any binding of `account` is owned by an account other than `owner`
    fn check_bindings(&self, owner: &str, account: &Account) -> Result<(), RepositoryError> {
        for key in InMemoryAccountStore::binding_keys(account) {
            if let Some(existing) = self.bindings.get(&key) {
                if existing != owner {
                    return Err(RepositoryError::Conflict {
                        method: key.0,
                        external_id: key.1,
                    });
                }
            }
        }
        Ok(())
    }

    fn index(&mut self, account: &Account) {
        for key in InMemoryAccountStore::binding_keys(account) {
            self.bindings.insert(key, account.id.clone());
        }
    }

    fn unindex(&mut self, id: &str) {
        self.bindings.retain(|_, owner| owner != id);
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountStore {
    async fn create(
        &self,
        _ctx: &RequestContext,
        account: &Account,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;

        if state.accounts.contains_key(&account.id) {
            return Err(RepositoryError::Storage(format!(
                "Account {} already exists",
                account.id
            )));
        }
        state.check_bindings(&account.id, account)?;

        state.index(account);
        state.accounts.insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        _ctx: &RequestContext,
        id: &str,
    ) -> Result<Option<Account>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.accounts.get(id).cloned())
    }

    async fn find_by_method_and_external_id(
        &self,
        _ctx: &RequestContext,
        method: &str,
        external_id: &str,
    ) -> Result<Option<Account>, RepositoryError> {
        let state = self.state.lock().await;
        let key = (method.to_string(), external_id.to_string());
        Ok(state
            .bindings
            .get(&key)
            .and_then(|id| state.accounts.get(id))
            .cloned())
    }

    async fn update(
        &self,
        _ctx: &RequestContext,
        id: &str,
        account: &Account,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;

        if !state.accounts.contains_key(id) {
            return Err(RepositoryError::NotFound(id.to_string()));
        }
        if account.id != id {
            return Err(RepositoryError::InvalidData(format!(
                "Account id {} does not match {}",
                account.id, id
            )));
        }
        state.check_bindings(id, account)?;

        state.unindex(id);
        state.index(account);
        state.accounts.insert(id.to_string(), account.clone());
        Ok(())
    }
}
