use async_trait::async_trait;

use crate::account::{errors::RepositoryError, types::Account};
use crate::context::RequestContext;

/// Durable store of accounts, keyed by id and by (method, external id)
///
/// Implementations must tolerate concurrent calls from independent requests and
/// must keep the (method, external id) pair unique across accounts, reporting a
/// violation as [`RepositoryError::Conflict`]. Writes made through `create` and
/// `update` must be visible to subsequent reads.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account
    async fn create(&self, ctx: &RequestContext, account: &Account) -> Result<(), RepositoryError>;

    /// Get an account by id, `None` if absent
    async fn find_by_id(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<Option<Account>, RepositoryError>;

    /// Get the account owning the binding `method` -> `external_id`, `None` if unbound
    async fn find_by_method_and_external_id(
        &self,
        ctx: &RequestContext,
        method: &str,
        external_id: &str,
    ) -> Result<Option<Account>, RepositoryError>;

    /// Replace the stored account `id` with `account`
    async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        account: &Account,
    ) -> Result<(), RepositoryError>;
}
