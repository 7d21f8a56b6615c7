use axum::http::StatusCode;
use inkgate_adapters::http::ErrorKind;
use serde_json::json;

use crate::helpers::{PASSWORD, TestApp, credentials, unique_email};

const NEW_PASSWORD: &str = "fresh-chapter-2024";

async fn request_reset(app: &TestApp, email: &str) -> String {
    app.post_forgot_password(json!({ "email": email })).await;
    app.token_sent_to(email).await
}

#[tokio::test]
async fn reset_replaces_the_password() {
    let app = TestApp::new();
    let email = unique_email();
    app.verified_account(&email).await;
    let token = request_reset(&app, &email).await;

    let response = app
        .patch_reset_password(&token, json!({ "password": NEW_PASSWORD }))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let old = app.post_login(credentials(&email, PASSWORD)).await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    let new = app.post_login(credentials(&email, NEW_PASSWORD)).await;
    assert_eq!(new.status, StatusCode::OK);
}

#[tokio::test]
async fn used_reset_token_cannot_be_reused() {
    let app = TestApp::new();
    let email = unique_email();
    app.verified_account(&email).await;
    let token = request_reset(&app, &email).await;

    let first = app
        .patch_reset_password(&token, json!({ "password": NEW_PASSWORD }))
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .patch_reset_password(&token, json!({ "password": "yet-another-pass-9" }))
        .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.error_kind(), ErrorKind::TokenError);
}

#[tokio::test]
async fn weak_new_password_leaves_the_token_usable() {
    let app = TestApp::new();
    let email = unique_email();
    app.verified_account(&email).await;
    let token = request_reset(&app, &email).await;

    let weak = app
        .patch_reset_password(&token, json!({ "password": "weak" }))
        .await;
    assert_eq!(weak.status, StatusCode::BAD_REQUEST);
    assert_eq!(weak.error_kind(), ErrorKind::ValidationError);

    let retry = app
        .patch_reset_password(&token, json!({ "password": NEW_PASSWORD }))
        .await;
    assert_eq!(retry.status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_reset_token_is_a_token_error() {
    let app = TestApp::new();

    let response = app
        .patch_reset_password(&"a".repeat(64), json!({ "password": NEW_PASSWORD }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_kind(), ErrorKind::TokenError);
}
