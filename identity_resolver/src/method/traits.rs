use async_trait::async_trait;

use crate::context::RequestContext;

use super::errors::MethodError;
use super::types::{AuthArgs, AuthRecord};

/// A pluggable authentication method (password, OAuth2 provider, token, ...)
///
/// Implementations check the proof arguments and report the outcome together
/// with the external identifier of the authenticated principal. Returning
/// `Err` is reserved for faults (bad input shape, unreachable provider).
#[async_trait]
pub trait AuthMethod: Send + Sync + 'static {
    async fn validate(
        &self,
        ctx: &RequestContext,
        args: &AuthArgs,
    ) -> Result<AuthRecord, MethodError>;
}
