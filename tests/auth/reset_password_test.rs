use axum::http::StatusCode;
use serde_json::json;

use crate::common::{unique_ip, TestContext};

async fn request_reset_token(ctx: &TestContext, email: &str) -> String {
    let response = ctx
        .server
        .post("/auth/forgot-password")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({"email": email}))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    // Demo mode echoes the token in place of email delivery.
    body["reset_token"].as_str().expect("reset token").to_string()
}

#[tokio::test]
async fn forgot_password_never_confirms_account_existence() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/forgot-password")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({"email": "nobody@campus.test"}))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body.get("reset_token").is_none());
}

#[tokio::test]
async fn reset_rejects_weak_passwords() {
    let ctx = TestContext::new().await;
    let token = request_reset_token(&ctx, "student@campus.test").await;

    let response = ctx
        .server
        .post("/auth/reset-password")
        .json(&json!({"token": token, "new_password": "short"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "WEAK_PASSWORD");
}

#[tokio::test]
async fn reset_token_is_single_use() {
    let ctx = TestContext::new().await;
    let token = request_reset_token(&ctx, "student@campus.test").await;

    ctx.server
        .post("/auth/reset-password")
        .json(&json!({"token": token, "new_password": "Brand-New-Pass1"}))
        .await
        .assert_status_ok();

    ctx.server
        .post("/auth/reset-password")
        .json(&json!({"token": token, "new_password": "Another-Pass1!"}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reset_invalidates_sessions_issued_before_it() {
    let ctx = TestContext::new().await;
    let old_session = ctx.student_token().await;

    // updated_at granularity is one second; make sure the reset lands
    // strictly after the token's iat.
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    let token = request_reset_token(&ctx, "student@campus.test").await;
    ctx.server
        .post("/auth/reset-password")
        .json(&json!({"token": token, "new_password": "Brand-New-Pass1"}))
        .await
        .assert_status_ok();

    ctx.server
        .get("/auth/me")
        .authorization_bearer(&old_session)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    // The new password works; the old one does not.
    ctx.server
        .post("/auth/login")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({
            "email": "student@campus.test",
            "password": "Student@12345"
        }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    ctx.login("student@campus.test", "Brand-New-Pass1").await;
}
