use axum::http::StatusCode;
use inkgate_adapters::http::ErrorKind;
use serde_json::{Value, json};

use crate::helpers::{TestApp, unique_email};

#[tokio::test]
async fn me_requires_a_session_token() {
    let app = TestApp::new();

    let response = app.get_me(None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_kind(), ErrorKind::TokenError);
}

#[tokio::test]
async fn me_rejects_a_forged_token() {
    let app = TestApp::new();

    let response = app.get_me(Some("eyJhbGciOiJIUzI1NiJ9.e30.c2lnbmF0dXJl")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_kind(), ErrorKind::TokenError);
}

#[tokio::test]
async fn me_returns_the_caller() {
    let app = TestApp::new();
    let email = unique_email();
    app.verified_account(&email).await;
    let session = app.session_for(&email).await;

    let response = app.get_me(Some(&session)).await;

    assert_eq!(response.status, StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["email"], email.as_str());
    assert_eq!(body["isVerified"], true);
}

#[tokio::test]
async fn session_issued_before_password_reset_is_revoked() {
    let app = TestApp::new();
    let email = unique_email();
    app.verified_account(&email).await;
    let session = app.session_for(&email).await;

    app.post_forgot_password(json!({ "email": email })).await;
    let reset_token = app.token_sent_to(&email).await;
    let response = app
        .patch_reset_password(&reset_token, json!({ "password": "brand-new-pass-3" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get_me(Some(&session)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_kind(), ErrorKind::TokenError);
}
