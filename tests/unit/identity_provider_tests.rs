//! Unit tests for `LocalIdentityProvider`.
//!
//! Covers each rejection reason the console distinguishes:
//! invalid email, unknown account, disabled account, wrong password,
//! and duplicate registration.

use std::sync::Arc;

use redecom_admin::auth::{IdentityProvider, LocalIdentityProvider};
use redecom_admin::persistence::db;
use redecom_admin::{AppError, AuthFailure};

async fn provider() -> LocalIdentityProvider {
    let db = db::connect_memory().await.expect("db");
    LocalIdentityProvider::new(Arc::new(db))
}

fn auth_reason(err: AppError) -> AuthFailure {
    match err {
        AppError::Auth(reason) => reason,
        other => panic!("expected auth failure, got {other}"),
    }
}

#[tokio::test]
async fn created_account_can_sign_in() {
    let provider = provider().await;
    let created = provider
        .create_account("u1", "Ana@Example.org", "segredo")
        .await
        .expect("create");
    assert_eq!(created.uid, "u1");
    assert_eq!(created.email, "ana@example.org");

    let identity = provider
        .sign_in(" ana@example.org ", "segredo")
        .await
        .expect("sign in");
    assert_eq!(identity, created);
}

#[tokio::test]
async fn wrong_password_is_reported() {
    let provider = provider().await;
    provider
        .create_account("u1", "ana@example.org", "segredo")
        .await
        .expect("create");
    let err = provider
        .sign_in("ana@example.org", "errado")
        .await
        .expect_err("wrong password");
    assert_eq!(auth_reason(err), AuthFailure::WrongPassword);
}

#[tokio::test]
async fn unknown_account_is_user_not_found() {
    let provider = provider().await;
    let err = provider
        .sign_in("ghost@example.org", "segredo")
        .await
        .expect_err("unknown");
    assert_eq!(auth_reason(err), AuthFailure::UserNotFound);
}

#[tokio::test]
async fn malformed_email_is_invalid() {
    let provider = provider().await;
    let err = provider
        .sign_in("not-an-email", "segredo")
        .await
        .expect_err("invalid");
    assert_eq!(auth_reason(err), AuthFailure::InvalidEmail);

    let err = provider
        .create_account("u1", "ana@", "segredo")
        .await
        .expect_err("invalid");
    assert_eq!(auth_reason(err), AuthFailure::InvalidEmail);
}

#[tokio::test]
async fn disabled_account_is_rejected_until_enabled() {
    let provider = provider().await;
    provider
        .create_account("u1", "ana@example.org", "segredo")
        .await
        .expect("create");
    provider
        .set_disabled("ana@example.org", true)
        .await
        .expect("disable");

    let err = provider
        .sign_in("ana@example.org", "segredo")
        .await
        .expect_err("disabled");
    assert_eq!(auth_reason(err), AuthFailure::UserDisabled);

    provider
        .set_disabled("ana@example.org", false)
        .await
        .expect("enable");
    provider
        .sign_in("ana@example.org", "segredo")
        .await
        .expect("sign in after enable");
}

#[tokio::test]
async fn duplicate_email_is_already_in_use() {
    let provider = provider().await;
    provider
        .create_account("u1", "ana@example.org", "segredo")
        .await
        .expect("create");
    let err = provider
        .create_account("u2", "ANA@example.org", "outrasenha")
        .await
        .expect_err("duplicate");
    assert_eq!(auth_reason(err), AuthFailure::EmailAlreadyInUse);
}

#[tokio::test]
async fn short_password_is_validation_error() {
    let provider = provider().await;
    let err = provider
        .create_account("u1", "ana@example.org", "123")
        .await
        .expect_err("short");
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn disabling_unknown_account_is_not_found() {
    let provider = provider().await;
    let err = provider
        .set_disabled("ghost@example.org", true)
        .await
        .expect_err("missing");
    assert!(matches!(err, AppError::NotFound(_)));
}
