use crate::context::RequestContext;
use crate::method::AuthArgs;

use super::errors::{ResolutionError, Stage};
use super::service::{IdentityService, guarded};

impl IdentityService {
    /// Attach `method` to an existing account, overwriting any previous binding.
    ///
    /// Never creates an account. Unless `link_conflict_check` is enabled, the
    /// repository's uniqueness index is the only guard against binding a pair
    /// that already belongs to another account.
    pub async fn link(
        &self,
        ctx: &RequestContext,
        account_id: &str,
        method: &str,
        args: &AuthArgs,
    ) -> Result<(), ResolutionError> {
        let ctx = self.scoped(ctx);
        let record = self.validate(&ctx, method, args).await?;

        let mut account = self.find_account(&ctx, account_id).await?;

        if self.config.link_conflict_check {
            let owner = guarded(
                &ctx,
                Stage::FindUserByAuthMethod,
                self.repository
                    .find_by_method_and_external_id(&ctx, method, &record.external_id),
            )
            .await?;

            if owner.is_some_and(|owner| owner.id != account.id) {
                return Err(ResolutionError::BindingConflict {
                    method: method.to_string(),
                    external_id: record.external_id,
                }
                .log());
            }
        }

        account.bind(method, record);
        self.update_account(&ctx, &account).await?;

        tracing::info!("Linked auth method {} to user {}", method, account.id);
        Ok(())
    }

    /// Detach `method` from an account. Removing an absent binding is not an error.
    ///
    /// The method does not need to be registered, so bindings of retired
    /// methods can still be removed. An account may end up with no bindings.
    pub async fn unlink(
        &self,
        ctx: &RequestContext,
        account_id: &str,
        method: &str,
    ) -> Result<(), ResolutionError> {
        let ctx = self.scoped(ctx);
        let mut account = self.find_account(&ctx, account_id).await?;

        if account.unbind(method).is_none() {
            tracing::debug!("User {} has no {} binding to remove", account.id, method);
        }

        self.update_account(&ctx, &account).await?;

        tracing::info!("Unlinked auth method {} from user {}", method, account.id);
        Ok(())
    }
}
