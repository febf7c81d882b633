use crate::common::{args, setup};
use identity_resolver::{RequestContext, ResolutionError, ServiceConfig};
use serde_json::json;

/// Password account gains Google, both methods log into the same account,
/// then Google is removed again
#[tokio::test]
async fn test_link_login_unlink_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let t = setup(ServiceConfig::default());
    let ctx = RequestContext::new();

    // Step 1: create the account through password login
    let session = t
        .service
        .login(&ctx, "password", &args(json!({"user": "bob", "pass": "y"})))
        .await?;
    let account_id = session.account_id;

    // Step 2: link google to it
    t.service
        .link(&ctx, &account_id, "google", &args(json!({"code": "code-b"})))
        .await?;
    let account = t.service.get_user(&ctx, &account_id).await?;
    let google = account.binding("google").ok_or("google should be linked")?;
    assert_eq!(google.external_id, "sub-b");

    // Step 3: logging in with google reaches the same account
    let via_google = t
        .service
        .login(&ctx, "google", &args(json!({"code": "code-b"})))
        .await?;
    assert_eq!(via_google.account_id, account_id);
    assert_eq!(t.store.len().await, 1);

    // Step 4: unlink google; the password binding remains
    t.service.unlink(&ctx, &account_id, "google").await?;
    let account = t.service.get_user(&ctx, &account_id).await?;
    assert!(!account.has_binding("google"));
    assert!(account.has_binding("password"));

    // Step 5: google login now creates a separate account
    let fresh = t
        .service
        .login(&ctx, "google", &args(json!({"code": "code-b"})))
        .await?;
    assert_ne!(fresh.account_id, account_id);
    assert_eq!(t.store.len().await, 2);
    Ok(())
}

#[tokio::test]
async fn test_unlink_last_method_leaves_empty_account() -> Result<(), Box<dyn std::error::Error>> {
    let t = setup(ServiceConfig::default());
    let ctx = RequestContext::new();
    let session = t
        .service
        .login(&ctx, "google", &args(json!({"code": "code-a"})))
        .await?;

    t.service.unlink(&ctx, &session.account_id, "google").await?;
    t.service.unlink(&ctx, &session.account_id, "google").await?;

    let account = t.service.get_user(&ctx, &session.account_id).await?;
    assert!(account.auth_data.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_link_and_unlink_missing_account() {
    let t = setup(ServiceConfig::default());
    let ctx = RequestContext::new();

    let link = t
        .service
        .link(&ctx, "nobody", "google", &args(json!({"code": "code-a"})))
        .await;
    let unlink = t.service.unlink(&ctx, "nobody", "google").await;

    assert!(matches!(link, Err(ResolutionError::UserNotFound { .. })));
    assert!(matches!(unlink, Err(ResolutionError::UserNotFound { .. })));
    assert!(t.store.is_empty().await);
}

#[tokio::test]
async fn test_conflict_check_protects_foreign_binding() -> Result<(), Box<dyn std::error::Error>> {
    let t = setup(ServiceConfig::default().with_link_conflict_check(true));
    let ctx = RequestContext::new();
    let alice = t
        .service
        .login(&ctx, "password", &args(json!({"user": "alice", "pass": "x"})))
        .await?;
    let google_owner = t
        .service
        .login(&ctx, "google", &args(json!({"code": "code-a"})))
        .await?;

    let err = t
        .service
        .link(&ctx, &alice.account_id, "google", &args(json!({"code": "code-a"})))
        .await
        .unwrap_err();

    assert!(matches!(err, ResolutionError::BindingConflict { .. }));
    let owner = t.service.get_user(&ctx, &google_owner.account_id).await?;
    assert!(owner.has_binding("google"));
    let alice = t.service.get_user(&ctx, &alice.account_id).await?;
    assert!(!alice.has_binding("google"));
    Ok(())
}
