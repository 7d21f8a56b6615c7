use axum::http::StatusCode;
use inkgate_adapters::http::ErrorKind;

use crate::helpers::{PASSWORD, TestApp, credentials, unique_email};

#[tokio::test]
async fn signup_wrong_verify_verify_then_login() {
    let app = TestApp::new();
    let email = unique_email();

    let response = app.post_signup(credentials(&email, PASSWORD)).await;
    assert_eq!(response.status, StatusCode::OK);

    let wrong = "0".repeat(64);
    let response = app.get_verify_email(&wrong).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_kind(), ErrorKind::TokenError);

    let response = app.post_login(credentials(&email, PASSWORD)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let token = app.token_sent_to(&email).await;
    let response = app.get_verify_email(&token).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.post_login(credentials(&email, PASSWORD)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn verification_token_is_single_use() {
    let app = TestApp::new();
    let email = unique_email();
    app.post_signup(credentials(&email, PASSWORD)).await;
    let token = app.token_sent_to(&email).await;

    assert_eq!(app.get_verify_email(&token).await.status, StatusCode::OK);

    let response = app.get_verify_email(&token).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_kind(), ErrorKind::TokenError);
}

#[tokio::test]
async fn malformed_verification_token_is_a_token_error() {
    let app = TestApp::new();

    let response = app.get_verify_email("not-a-token").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_kind(), ErrorKind::TokenError);
}
