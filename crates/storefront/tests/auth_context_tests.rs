//! Startup session check and login/logout against a mock API

mod common;

use common::{Harness, user_json};
use techhub_storefront::{MemorySessionStore, SessionFailurePolicy, SessionStatus, SessionStore};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_initialize_without_token_makes_no_request() {
    let h = Harness::anonymous().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(0)
        .mount(&h.server)
        .await;

    assert_eq!(h.auth.initialize().await, SessionStatus::Anonymous);
    assert!(!h.auth.is_authenticated());
}

#[tokio::test]
async fn test_initialize_restores_user() {
    let h = Harness::signed_in("tok-1").await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&h.server)
        .await;

    assert_eq!(h.auth.initialize().await, SessionStatus::Restored);
    assert!(h.auth.is_authenticated());
    assert_eq!(h.auth.user().map(|u| u.username), Some("ann".to_string()));
}

#[tokio::test]
async fn test_initialize_purges_rejected_token() {
    let h = Harness::signed_in("stale").await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"detail": "Could not validate credentials"})),
        )
        .mount(&h.server)
        .await;

    assert_eq!(h.auth.initialize().await, SessionStatus::Purged);
    assert!(!h.auth.is_authenticated());
    assert_eq!(h.store.get(), None);
}

#[tokio::test]
async fn test_default_policy_purges_on_server_error() {
    let h = Harness::signed_in("tok").await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&h.server)
        .await;

    assert_eq!(h.auth.initialize().await, SessionStatus::Purged);
    assert_eq!(h.store.get(), None);
}

#[tokio::test]
async fn test_rejection_policy_keeps_token_on_server_error() {
    let h = Harness::build(
        MemorySessionStore::with_token("tok"),
        SessionFailurePolicy::LogoutOnRejection,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&h.server)
        .await;

    assert_eq!(h.auth.initialize().await, SessionStatus::Kept);
    assert!(h.auth.is_authenticated());
    assert!(h.auth.user().is_none());
    assert_eq!(h.store.get().as_deref(), Some("tok"));
}

#[tokio::test]
async fn test_rejection_policy_still_purges_on_forbidden() {
    let h = Harness::build(
        MemorySessionStore::with_token("tok"),
        SessionFailurePolicy::LogoutOnRejection,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&h.server)
        .await;

    assert_eq!(h.auth.initialize().await, SessionStatus::Purged);
    assert!(!h.auth.is_authenticated());
}

#[tokio::test]
async fn test_logout_makes_no_request() {
    let h = Harness::signed_in("tok").await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.server)
        .await;

    h.auth.logout();
    assert!(!h.auth.is_authenticated());
    assert_eq!(h.store.get(), None);
}

#[tokio::test]
async fn test_login_does_not_fetch_profile() {
    let h = Harness::anonymous().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(0)
        .mount(&h.server)
        .await;

    h.auth.login("fresh");
    assert!(h.auth.is_authenticated());
    assert!(h.auth.user().is_none());
    assert_eq!(h.store.get().as_deref(), Some("fresh"));
}

#[tokio::test]
async fn test_login_during_startup_check_wins() {
    let h = Harness::signed_in("first").await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(
            ResponseTemplate::new(401).set_delay(std::time::Duration::from_millis(300)),
        )
        .mount(&h.server)
        .await;

    let auth = h.auth.clone();
    let (status, ()) = tokio::join!(h.auth.initialize(), async move {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        auth.login("other");
    });

    assert_eq!(status, SessionStatus::Superseded);
    assert_eq!(h.store.get().as_deref(), Some("other"));
    assert!(h.auth.is_authenticated());
}
