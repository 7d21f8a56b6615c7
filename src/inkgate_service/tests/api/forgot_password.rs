use axum::http::StatusCode;
use inkgate_adapters::http::{ErrorKind, routes::FORGOT_PASSWORD_MESSAGE};
use serde_json::{Value, json};

use crate::helpers::{TestApp, unique_email};

#[tokio::test]
async fn responses_are_identical_for_known_and_unknown_emails() {
    let app = TestApp::new();
    let known = unique_email();
    app.verified_account(&known).await;

    let known_response = app.post_forgot_password(json!({ "email": known })).await;
    let unknown_response = app
        .post_forgot_password(json!({ "email": unique_email() }))
        .await;

    assert_eq!(known_response.status, StatusCode::OK);
    assert_eq!(unknown_response.status, StatusCode::OK);
    assert_eq!(known_response.body, unknown_response.body);
    assert_eq!(
        known_response.json::<Value>()["message"],
        FORGOT_PASSWORD_MESSAGE
    );
}

#[tokio::test]
async fn reset_link_is_only_sent_to_existing_accounts() {
    let app = TestApp::new();
    let known = unique_email();
    let unknown = unique_email();
    app.verified_account(&known).await;

    app.post_forgot_password(json!({ "email": known })).await;
    app.post_forgot_password(json!({ "email": unknown })).await;

    // One verification email plus one reset email.
    assert_eq!(app.emails_sent_to(&known).await, 2);
    assert_eq!(app.emails_sent_to(&unknown).await, 0);

    let sent = app.email_client.sent().await;
    let reset = sent.last().unwrap();
    assert!(reset.content.contains("http://localhost:3000/reset-password/"));
}

#[tokio::test]
async fn malformed_email_is_a_validation_error() {
    let app = TestApp::new();

    let response = app
        .post_forgot_password(json!({ "email": "nobody-at-example" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_kind(), ErrorKind::ValidationError);
}
