use axum::http::StatusCode;
use inkgate_adapters::http::{ErrorKind, ErrorResponse, routes::SignupResponse};
use inkgate_application::AuthPolicy;
use inkgate_core::{Email, TokenPurpose, UserStore};
use serde_json::json;

use crate::helpers::{PASSWORD, TestApp, credentials, policy, unique_email};

#[tokio::test]
async fn signup_creates_unverified_account_and_sends_verification_link() {
    let app = TestApp::new();
    let email = unique_email();

    let response = app.post_signup(credentials(&email, PASSWORD)).await;

    assert_eq!(response.status, StatusCode::OK);
    let body: SignupResponse = response.json();
    assert_eq!(body.status, "pending_verification");

    let user = app
        .user_store
        .get_user(&Email::parse(&email).unwrap())
        .await
        .unwrap();
    assert!(!user.is_verified());
    let verification = user.token(TokenPurpose::EmailVerification).unwrap();
    assert!(verification.expires_at() > chrono::Utc::now());

    assert_eq!(app.emails_sent_to(&email).await, 1);
    let sent = app.email_client.sent().await;
    assert!(sent[0].content.contains("http://localhost:3000/verify-email/"));
    let html = sent[0].html_content.as_deref().unwrap();
    assert!(html.contains(r#"href="http://localhost:3000/verify-email/"#));
}

#[tokio::test]
async fn signup_rejects_invalid_input_with_validation_error() {
    let app = TestApp::new();

    let cases = [
        credentials("not-an-email", PASSWORD),
        credentials(&unique_email(), "short1"),
        credentials(&unique_email(), "onlylettersherenodigits"),
        json!({ "email": unique_email() }),
    ];

    for body in cases {
        let response = app.post_signup(body.clone()).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "input: {body}");
        assert_eq!(response.error_kind(), ErrorKind::ValidationError);
    }

    assert!(app.email_client.sent().await.is_empty());
}

#[tokio::test]
async fn signup_with_taken_email_is_concealed_as_validation_error() {
    let app = TestApp::new();
    let email = unique_email();
    app.post_signup(credentials(&email, PASSWORD)).await;

    let response = app.post_signup(credentials(&email, "another-pass-77")).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.kind, ErrorKind::ValidationError);
    assert!(!body.message.to_lowercase().contains("exists"));
    assert_eq!(app.emails_sent_to(&email).await, 1);
}

#[tokio::test]
async fn signup_with_taken_email_reports_conflict_when_not_concealing() {
    let app = TestApp::with_policy(AuthPolicy {
        conceal_account_existence: false,
        ..policy()
    });
    let email = unique_email();
    app.post_signup(credentials(&email, PASSWORD)).await;

    let response = app.post_signup(credentials(&email, PASSWORD)).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_kind(), ErrorKind::ConflictError);
}

#[tokio::test]
async fn signup_normalizes_email_case() {
    let app = TestApp::new();
    let email = unique_email();

    app.post_signup(credentials(&email.to_uppercase(), PASSWORD))
        .await;

    assert!(
        app.user_store
            .get_user(&Email::parse(&email).unwrap())
            .await
            .is_ok()
    );
}
