use async_trait::async_trait;
use identity_resolver::{AuthArgs, AuthMethod, AuthRecord, MethodError, RequestContext};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::env;

fn required_str<'a>(args: &'a AuthArgs, key: &str) -> Result<&'a str, MethodError> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| MethodError::InvalidArgs(format!("missing `{key}`")))
}

/// Plain-text password table, for demonstration only
pub(crate) struct PasswordMethod {
    users: HashMap<String, String>,
}

impl PasswordMethod {
    /// Read `user:pass` pairs from `DEMO_USERS` (comma separated)
    pub(crate) fn from_env() -> Self {
        let raw = env::var("DEMO_USERS").unwrap_or_else(|_| "alice:secret,bob:hunter2".to_string());
        let users = raw
            .split(',')
            .filter_map(|pair| pair.split_once(':'))
            .map(|(user, pass)| (user.trim().to_string(), pass.trim().to_string()))
            .collect::<HashMap<_, _>>();
        tracing::debug!("Demo password users: {:?}", users.keys().collect::<Vec<_>>());
        Self { users }
    }
}

#[async_trait]
impl AuthMethod for PasswordMethod {
    async fn validate(
        &self,
        _ctx: &RequestContext,
        args: &AuthArgs,
    ) -> Result<AuthRecord, MethodError> {
        let user = required_str(args, "user")?;
        let pass = required_str(args, "pass")?;

        match self.users.get(user) {
            Some(expected) if expected == pass => {
                Ok(AuthRecord::validated(user, json!({ "user": user })))
            }
            _ => Ok(AuthRecord::rejected(user)),
        }
    }
}

/// Accepts any email whose token is `ok`
#[derive(Default)]
pub(crate) struct MagicLinkMethod;

#[async_trait]
impl AuthMethod for MagicLinkMethod {
    async fn validate(
        &self,
        _ctx: &RequestContext,
        args: &AuthArgs,
    ) -> Result<AuthRecord, MethodError> {
        let email = required_str(args, "email")?.to_lowercase();
        let token = required_str(args, "token")?;

        if token != "ok" {
            return Ok(AuthRecord::rejected(email));
        }
        Ok(AuthRecord::validated(
            email.clone(),
            json!({ "email": email, "verified_at": chrono::Utc::now() }),
        ))
    }
}
