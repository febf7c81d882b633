use async_trait::async_trait;
use chrono::{Duration, Utc};
use identity_resolver::{IssuedToken, RequestContext, TokenError, TokenIssuer};
use std::env;
use uuid::Uuid;

/// Random opaque tokens with a fixed lifetime
pub(crate) struct OpaqueTokenIssuer {
    ttl: Duration,
}

impl OpaqueTokenIssuer {
    /// Lifetime from `DEMO_TOKEN_TTL_SECS`, default 15 minutes
    pub(crate) fn from_env() -> Self {
        let secs = env::var("DEMO_TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(900);
        Self {
            ttl: Duration::seconds(secs),
        }
    }
}

#[async_trait]
impl TokenIssuer for OpaqueTokenIssuer {
    async fn issue(
        &self,
        ctx: &RequestContext,
        account_id: &str,
    ) -> Result<IssuedToken, TokenError> {
        if account_id.is_empty() {
            return Err(TokenError::Issuance("empty account id".to_string()));
        }
        tracing::debug!(
            "Issuing token for {} (request {})",
            account_id,
            ctx.request_id()
        );
        Ok(IssuedToken {
            access_token: Uuid::new_v4().simple().to_string(),
            expires_at: Some(Utc::now() + self.ttl),
            refresh_token: Some(Uuid::new_v4().simple().to_string()),
        })
    }
}
