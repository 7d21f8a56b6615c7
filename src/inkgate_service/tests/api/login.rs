use axum::http::StatusCode;
use inkgate_adapters::http::{ErrorKind, ErrorResponse};
use inkgate_application::AuthPolicy;
use serde_json::Value;

use crate::helpers::{PASSWORD, TestApp, credentials, policy, unique_email};

#[tokio::test]
async fn login_returns_token_and_user_for_verified_account() {
    let app = TestApp::new();
    let email = unique_email();
    app.verified_account(&email).await;

    let response = app.post_login(credentials(&email, PASSWORD)).await;

    assert_eq!(response.status, StatusCode::OK);
    let body: Value = response.json();
    assert!(body["token"].as_str().is_some_and(|token| !token.is_empty()));
    assert_eq!(body["user"]["email"], email.as_str());
    assert_eq!(body["user"]["isVerified"], true);
    assert!(body["user"]["id"].is_string());
}

#[tokio::test]
async fn login_on_unverified_account_is_refused_when_verification_is_required() {
    let app = TestApp::new();
    let email = unique_email();
    app.post_signup(credentials(&email, PASSWORD)).await;

    let response = app.post_login(credentials(&email, PASSWORD)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_kind(), ErrorKind::AuthenticationError);
}

#[tokio::test]
async fn login_on_unverified_account_succeeds_when_verification_is_optional() {
    let app = TestApp::with_policy(AuthPolicy {
        require_verified_email: false,
        ..policy()
    });
    let email = unique_email();
    app.post_signup(credentials(&email, PASSWORD)).await;

    let response = app.post_login(credentials(&email, PASSWORD)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json::<Value>()["user"]["isVerified"], false);
}

#[tokio::test]
async fn unknown_email_and_wrong_password_are_indistinguishable() {
    let app = TestApp::new();
    let email = unique_email();
    app.verified_account(&email).await;

    let wrong_password = app
        .post_login(credentials(&email, "not-the-password-1"))
        .await;
    let unknown_email = app
        .post_login(credentials(&unique_email(), PASSWORD))
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);

    let body: ErrorResponse = wrong_password.json();
    assert_eq!(body.kind, ErrorKind::AuthenticationError);
}

#[tokio::test]
async fn login_with_malformed_body_is_a_validation_error() {
    let app = TestApp::new();

    let response = app
        .post_login(serde_json::json!({ "email": unique_email() }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_kind(), ErrorKind::ValidationError);
}
