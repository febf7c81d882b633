use async_trait::async_trait;
use identity_resolver::{
    AuthArgs, AuthMethod, AuthMethodRegistry, AuthRecord, IdentityService, InMemoryAccountStore,
    IssuedToken, MethodError, RequestContext, ServiceConfig, TokenError, TokenIssuer,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Username/password method over a fixed credential table
pub struct PasswordMethod {
    users: HashMap<String, String>,
}

impl PasswordMethod {
    pub fn new(users: &[(&str, &str)]) -> Self {
        Self {
            users: users
                .iter()
                .map(|(u, p)| (u.to_string(), p.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl AuthMethod for PasswordMethod {
    async fn validate(
        &self,
        _ctx: &RequestContext,
        args: &AuthArgs,
    ) -> Result<AuthRecord, MethodError> {
        let user = args
            .get("user")
            .and_then(Value::as_str)
            .ok_or_else(|| MethodError::InvalidArgs("missing user".to_string()))?;
        let pass = args.get("pass").and_then(Value::as_str).unwrap_or_default();

        if self.users.get(user).map(String::as_str) == Some(pass) {
            Ok(AuthRecord::validated(user, json!({ "user": user })))
        } else {
            Ok(AuthRecord::rejected(user))
        }
    }
}

/// OAuth2-style method: `code` maps to a provider subject, payload carries an expiry
pub struct MockOAuth2Method {
    subjects: HashMap<String, String>,
}

impl MockOAuth2Method {
    pub fn new(codes: &[(&str, &str)]) -> Self {
        Self {
            subjects: codes
                .iter()
                .map(|(code, sub)| (code.to_string(), sub.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl AuthMethod for MockOAuth2Method {
    async fn validate(
        &self,
        _ctx: &RequestContext,
        args: &AuthArgs,
    ) -> Result<AuthRecord, MethodError> {
        let code = args
            .get("code")
            .and_then(Value::as_str)
            .ok_or_else(|| MethodError::InvalidArgs("missing code".to_string()))?;
        let expires_in = args.get("expires_in").cloned().unwrap_or(json!(3600));

        match self.subjects.get(code) {
            Some(sub) => Ok(AuthRecord::validated(
                sub.clone(),
                json!({ "sub": sub, "expires_in": expires_in }),
            )),
            None => Ok(AuthRecord::rejected("")),
        }
    }
}

/// Issues `at-<n>` tokens and counts calls
#[derive(Default)]
pub struct SequenceIssuer {
    issued: AtomicUsize,
}

impl SequenceIssuer {
    pub fn issued(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenIssuer for SequenceIssuer {
    async fn issue(
        &self,
        _ctx: &RequestContext,
        _account_id: &str,
    ) -> Result<IssuedToken, TokenError> {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(IssuedToken {
            access_token: format!("at-{n}"),
            expires_at: None,
            refresh_token: Some(format!("rt-{n}")),
        })
    }
}

pub struct TestContext {
    pub store: Arc<InMemoryAccountStore>,
    pub issuer: Arc<SequenceIssuer>,
    pub service: Arc<IdentityService>,
}

/// Service with `password` (alice:x, bob:y) and `google` (code-a -> sub-a, code-b -> sub-b)
pub fn setup(config: ServiceConfig) -> TestContext {
    super::init_test_environment();

    let store = Arc::new(InMemoryAccountStore::new());
    let issuer = Arc::new(SequenceIssuer::default());
    let registry = AuthMethodRegistry::builder()
        .with_method("password", PasswordMethod::new(&[("alice", "x"), ("bob", "y")]))
        .with_method(
            "google",
            MockOAuth2Method::new(&[("code-a", "sub-a"), ("code-b", "sub-b")]),
        )
        .build();
    let service = Arc::new(IdentityService::with_config(
        store.clone(),
        issuer.clone(),
        registry,
        config,
    ));

    TestContext {
        store,
        issuer,
        service,
    }
}

pub fn args(value: Value) -> AuthArgs {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
