use async_trait::async_trait;

use crate::context::RequestContext;

use super::errors::TokenError;
use super::types::IssuedToken;

/// Mints session credentials for a resolved account
#[async_trait]
pub trait TokenIssuer: Send + Sync + 'static {
    async fn issue(
        &self,
        ctx: &RequestContext,
        account_id: &str,
    ) -> Result<IssuedToken, TokenError>;
}
