use std::future::Future;
use std::sync::Arc;

use crate::account::{Account, AccountRepository};
use crate::config::ServiceConfig;
use crate::context::RequestContext;
use crate::method::{AuthArgs, AuthMethodRegistry, AuthRecord};
use crate::token::TokenIssuer;

use super::errors::{CollaboratorFault, ResolutionError, Stage};

/// Resolves authentication events to accounts and manages their method bindings
///
/// The service holds no mutable state besides its collaborators; concurrency
/// control is left to the repository and token issuer.
pub struct IdentityService {
    pub(super) repository: Arc<dyn AccountRepository>,
    pub(super) token_issuer: Arc<dyn TokenIssuer>,
    pub(super) registry: AuthMethodRegistry,
    pub(super) config: ServiceConfig,
}

impl IdentityService {
    pub fn new(
        repository: Arc<dyn AccountRepository>,
        token_issuer: Arc<dyn TokenIssuer>,
        registry: AuthMethodRegistry,
    ) -> Self {
        Self::with_config(repository, token_issuer, registry, ServiceConfig::default())
    }

    pub fn with_config(
        repository: Arc<dyn AccountRepository>,
        token_issuer: Arc<dyn TokenIssuer>,
        registry: AuthMethodRegistry,
        config: ServiceConfig,
    ) -> Self {
        tracing::debug!(
            "Identity service configured with methods {:?} and {:?}",
            registry.method_names(),
            config
        );
        Self {
            repository,
            token_issuer,
            registry,
            config,
        }
    }

    pub fn registry(&self) -> &AuthMethodRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Get an account by id
    pub async fn get_user(
        &self,
        ctx: &RequestContext,
        account_id: &str,
    ) -> Result<Account, ResolutionError> {
        let ctx = self.scoped(ctx);
        self.find_account(&ctx, account_id).await
    }

    /// Apply the configured default timeout to contexts that carry no deadline
    pub(super) fn scoped(&self, ctx: &RequestContext) -> RequestContext {
        match (ctx.deadline(), self.config.default_timeout) {
            (None, Some(timeout)) => ctx.clone().with_timeout(timeout),
            _ => ctx.clone(),
        }
    }

    /// Resolve `method` in the registry and check `args` with it.
    ///
    /// Only a record with `validated == true` is accepted.
    pub(super) async fn validate(
        &self,
        ctx: &RequestContext,
        method: &str,
        args: &AuthArgs,
    ) -> Result<AuthRecord, ResolutionError> {
        let auth_method = self.registry.get(method).ok_or_else(|| {
            ResolutionError::InvalidAuthMethod {
                name: method.to_string(),
            }
            .log()
        })?;

        let record = guarded(
            ctx,
            Stage::ValidateAuthData,
            auth_method.validate(ctx, args),
        )
        .await?;

        if !record.validated {
            tracing::debug!(
                "Auth method {} rejected proof for {:?}",
                method,
                record.external_id
            );
            return Err(ResolutionError::InvalidAuthData.log());
        }

        Ok(record)
    }

    /// Load an account, mapping absence to `UserNotFound`
    pub(super) async fn find_account(
        &self,
        ctx: &RequestContext,
        account_id: &str,
    ) -> Result<Account, ResolutionError> {
        guarded(
            ctx,
            Stage::FindUserById,
            self.repository.find_by_id(ctx, account_id),
        )
        .await?
        .ok_or_else(|| {
            ResolutionError::UserNotFound {
                account_id: account_id.to_string(),
            }
            .log()
        })
    }

    pub(super) async fn update_account(
        &self,
        ctx: &RequestContext,
        account: &Account,
    ) -> Result<(), ResolutionError> {
        guarded(
            ctx,
            Stage::UpdateUser,
            self.repository.update(ctx, &account.id, account),
        )
        .await
    }
}

/// Await a collaborator call under the context deadline, wrapping any failure with `stage`
pub(super) async fn guarded<T, E, F>(
    ctx: &RequestContext,
    stage: Stage,
    call: F,
) -> Result<T, ResolutionError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<CollaboratorFault>,
{
    match ctx.run(call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(ResolutionError::collaborator(stage, err)),
        Err(_) => Err(ResolutionError::collaborator(
            stage,
            CollaboratorFault::DeadlineExceeded,
        )),
    }
}
