use axum::http::StatusCode;
use inkgate_adapters::http::{ErrorKind, routes::RESEND_VERIFICATION_MESSAGE};
use serde_json::{Value, json};

use crate::helpers::{PASSWORD, TestApp, credentials, unique_email};

#[tokio::test]
async fn resend_invalidates_the_previous_verification_token() {
    let app = TestApp::new();
    let email = unique_email();
    app.post_signup(credentials(&email, PASSWORD)).await;
    let first = app.token_sent_to(&email).await;

    let response = app
        .post_resend_verification(json!({ "email": email }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let second = app.token_sent_to(&email).await;
    assert_ne!(first, second);

    let stale = app.get_verify_email(&first).await;
    assert_eq!(stale.status, StatusCode::BAD_REQUEST);
    assert_eq!(stale.error_kind(), ErrorKind::TokenError);

    let fresh = app.get_verify_email(&second).await;
    assert_eq!(fresh.status, StatusCode::OK);
}

#[tokio::test]
async fn resend_answers_the_same_for_unknown_and_verified_accounts() {
    let app = TestApp::new();
    let verified = unique_email();
    app.verified_account(&verified).await;

    let for_verified = app
        .post_resend_verification(json!({ "email": verified }))
        .await;
    let for_unknown = app
        .post_resend_verification(json!({ "email": unique_email() }))
        .await;

    assert_eq!(for_verified.status, StatusCode::OK);
    assert_eq!(for_verified.body, for_unknown.body);
    assert_eq!(
        for_unknown.json::<Value>()["message"],
        RESEND_VERIFICATION_MESSAGE
    );
    // Only the original verification email.
    assert_eq!(app.emails_sent_to(&verified).await, 1);
}
