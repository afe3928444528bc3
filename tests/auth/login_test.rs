use axum::http::StatusCode;
use serde_json::json;

use crate::common::{unique_ip, TestContext};

#[tokio::test]
async fn login_with_valid_credentials_returns_token_and_cookie() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/login")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({
            "email": "student@campus.test",
            "password": "Student@12345"
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["role"], "STUDENT");
    assert!(body.get("access_token").is_some());
    // No remember_me, so no refresh token.
    assert!(body.get("refresh_token").is_none());
    assert!(response.maybe_cookie("token").is_some());
    assert!(response.maybe_cookie("refreshToken").is_none());
}

#[tokio::test]
async fn remember_me_also_issues_refresh_token() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/login")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({
            "email": "student@campus.test",
            "password": "Student@12345",
            "remember_me": true
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body.get("refresh_token").is_some());
    assert!(response.maybe_cookie("refreshToken").is_some());
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_the_same_401() {
    let ctx = TestContext::new().await;

    let wrong_password = ctx
        .server
        .post("/auth/login")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({
            "email": "student@campus.test",
            "password": "NotThePassword1!"
        }))
        .await;
    wrong_password.assert_status(StatusCode::UNAUTHORIZED);
    let wrong_body: serde_json::Value = wrong_password.json();

    let unknown_email = ctx
        .server
        .post("/auth/login")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({
            "email": "nobody@campus.test",
            "password": "Student@12345"
        }))
        .await;
    unknown_email.assert_status(StatusCode::UNAUTHORIZED);
    let unknown_body: serde_json::Value = unknown_email.json();

    // Identical error body: the response must not leak which part failed.
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["error"], "INVALID_CREDENTIALS");
    assert!(wrong_password.maybe_cookie("token").is_none());
}

#[tokio::test]
async fn suspended_account_is_blocked_even_with_correct_password() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_token().await;
    let student_id = ctx.user_id("student@campus.test").await;

    ctx.server
        .put(&format!("/users/{student_id}/status"))
        .authorization_bearer(&admin)
        .json(&json!({"status": "SUSPENDED"}))
        .await
        .assert_status_ok();

    let response = ctx
        .server
        .post("/auth/login")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({
            "email": "student@campus.test",
            "password": "Student@12345"
        }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "ACCOUNT_SUSPENDED");
    assert!(response.maybe_cookie("token").is_none());
}
