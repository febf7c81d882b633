mod issuer;
mod methods;

use std::sync::Arc;

use identity_resolver::{
    AuthArgs, AuthMethodRegistry, IdentityService, InMemoryAccountStore, RequestContext,
    ServiceConfig,
};
use serde_json::{Value, json};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use issuer::OpaqueTokenIssuer;
use methods::{MagicLinkMethod, PasswordMethod};

fn init_tracing(app_name: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        #[cfg(debug_assertions)]
        {
            format!("identity_resolver=debug,{app_name}=debug,info").into()
        }

        #[cfg(not(debug_assertions))]
        {
            "info".into()
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("You can increase verbosity by setting the RUST_LOG environment variable.");
}

fn args(value: Value) -> AuthArgs {
    match value {
        Value::Object(map) => map,
        _ => AuthArgs::new(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing("demo_identity");

    let registry = AuthMethodRegistry::builder()
        .with_method("password", PasswordMethod::from_env())
        .with_method("magic-link", MagicLinkMethod::default())
        .build();
    let service = IdentityService::with_config(
        Arc::new(InMemoryAccountStore::new()),
        Arc::new(OpaqueTokenIssuer::from_env()),
        registry,
        ServiceConfig::from_env(),
    );

    let ctx = RequestContext::new();

    // Sign up through a password
    let session = service
        .login(&ctx, "password", &args(json!({"user": "alice", "pass": "secret"})))
        .await?;
    tracing::info!("Password login: {}", serde_json::to_string(&session)?);

    // Attach a magic link address to the same account
    service
        .link(
            &ctx,
            &session.account_id,
            "magic-link",
            &args(json!({"email": "alice@example.com", "token": "ok"})),
        )
        .await?;

    // Logging in by magic link reaches the same account
    let via_link = service
        .login(
            &ctx,
            "magic-link",
            &args(json!({"email": "alice@example.com", "token": "ok"})),
        )
        .await?;
    tracing::info!(
        "Magic link login reached {} (same account: {})",
        via_link.account_id,
        via_link.account_id == session.account_id
    );

    // Detach the password
    service.unlink(&ctx, &session.account_id, "password").await?;
    let account = service.get_user(&ctx, &session.account_id).await?;
    println!("{}", serde_json::to_string_pretty(&account)?);

    // Unknown method and bad proof are reported as errors
    if let Err(e) = service.login(&ctx, "fax", &AuthArgs::new()).await {
        tracing::warn!("Expected failure: {}", e);
    }
    if let Err(e) = service
        .login(&ctx, "password", &args(json!({"user": "alice", "pass": "wrong"})))
        .await
    {
        tracing::warn!("Expected failure: {}", e);
    }

    Ok(())
}
