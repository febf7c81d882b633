use crate::account::{Account, RepositoryError};
use crate::context::RequestContext;
use crate::method::{AuthArgs, AuthRecord};
use crate::token::SessionBundle;

use super::errors::{CollaboratorFault, ResolutionError, Stage};
use super::service::{IdentityService, guarded};

impl IdentityService {
    /// Authenticate with `method` and return a session for the owning account.
    ///
    /// 1. Validate `args` with the registered method
    /// 2. Find the account bound to (method, external id), or create one
    /// 3. Refresh the stored binding on an existing account
    /// 4. Issue a session token for the account
    ///
    /// Account changes are not rolled back if token issuance fails.
    pub async fn login(
        &self,
        ctx: &RequestContext,
        method: &str,
        args: &AuthArgs,
    ) -> Result<SessionBundle, ResolutionError> {
        let ctx = self.scoped(ctx);
        let record = self.validate(&ctx, method, args).await?;

        let account_id = self.resolve_account(&ctx, method, record).await?;

        let token = guarded(
            &ctx,
            Stage::GenerateToken,
            self.token_issuer.issue(&ctx, &account_id),
        )
        .await?;

        tracing::debug!("Issued session for user {} via {}", account_id, method);
        Ok(SessionBundle::new(account_id, token))
    }

    /// Find-or-create the account owning (method, record.external_id).
    ///
    /// Losing a create race to a concurrent login surfaces as a repository
    /// conflict; the winner's account is then re-fetched and updated instead.
    async fn resolve_account(
        &self,
        ctx: &RequestContext,
        method: &str,
        record: AuthRecord,
    ) -> Result<String, ResolutionError> {
        let mut retries_left = self.config.create_conflict_retries;

        loop {
            let existing = guarded(
                ctx,
                Stage::FindUserByAuthMethod,
                self.repository
                    .find_by_method_and_external_id(ctx, method, &record.external_id),
            )
            .await?;

            if let Some(mut account) = existing {
                account.bind(method, record);
                self.update_account(ctx, &account).await?;
                tracing::debug!("Refreshed {} binding of user {}", method, account.id);
                return Ok(account.id);
            }

            let account = Account::new(method, record.clone());
            match ctx.run(self.repository.create(ctx, &account)).await {
                Ok(Ok(())) => {
                    tracing::info!("Created user {} via {}", account.id, method);
                    return Ok(account.id);
                }
                Ok(Err(RepositoryError::Conflict { .. })) if retries_left > 0 => {
                    retries_left -= 1;
                    tracing::warn!(
                        "Lost create race for {}/{}, retrying as update",
                        method,
                        record.external_id
                    );
                }
                Ok(Err(err)) => return Err(ResolutionError::collaborator(Stage::CreateUser, err)),
                Err(_) => {
                    return Err(ResolutionError::collaborator(
                        Stage::CreateUser,
                        CollaboratorFault::DeadlineExceeded,
                    ));
                }
            }
        }
    }
}
