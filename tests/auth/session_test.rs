use axum::http::StatusCode;
use serde_json::json;

use crate::common::{unique_ip, TestContext};

#[tokio::test]
async fn me_returns_the_authenticated_user() {
    let ctx = TestContext::new().await;
    let token = ctx.teacher_token().await;

    let response = ctx.server.get("/auth/me").authorization_bearer(&token).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["email"], "teacher@campus.test");
    assert_eq!(body["role"], "TEACHER");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn refresh_rotates_the_refresh_token() {
    let ctx = TestContext::new().await;

    let login = ctx
        .server
        .post("/auth/login")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({
            "email": "student@campus.test",
            "password": "Student@12345",
            "remember_me": true
        }))
        .await;
    login.assert_status_ok();
    let body: serde_json::Value = login.json();
    let refresh_token = body["refresh_token"].as_str().unwrap().to_string();

    let refreshed = ctx
        .server
        .post("/auth/refresh")
        .json(&json!({"refresh_token": refresh_token}))
        .await;
    refreshed.assert_status_ok();
    let refreshed_body: serde_json::Value = refreshed.json();
    let new_access = refreshed_body["access_token"].as_str().unwrap();

    ctx.server
        .get("/auth/me")
        .authorization_bearer(new_access)
        .await
        .assert_status_ok();

    // The old refresh token was revoked by the rotation.
    ctx.server
        .post("/auth/refresh")
        .json(&json!({"refresh_token": refresh_token}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn access_token_is_rejected_as_refresh_token() {
    let ctx = TestContext::new().await;
    let token = ctx.student_token().await;

    ctx.server
        .post("/auth/refresh")
        .json(&json!({"refresh_token": token}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_clears_session_cookies() {
    let ctx = TestContext::new().await;
    let token = ctx.student_token().await;

    let response = ctx
        .server
        .post("/auth/logout")
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();

    // Both cookies come back emptied.
    let cookie = response.maybe_cookie("token").expect("cleared token cookie");
    assert!(cookie.value().is_empty());
}

#[tokio::test]
async fn suspension_invalidates_existing_sessions() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_token().await;
    let student = ctx.student_token().await;
    let student_id = ctx.user_id("student@campus.test").await;

    ctx.server
        .get("/auth/me")
        .authorization_bearer(&student)
        .await
        .assert_status_ok();

    ctx.server
        .put(&format!("/users/{student_id}/status"))
        .authorization_bearer(&admin)
        .json(&json!({"status": "SUSPENDED"}))
        .await
        .assert_status_ok();

    let response = ctx.server.get("/auth/me").authorization_bearer(&student).await;
    response.assert_status(StatusCode::FORBIDDEN);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "ACCOUNT_SUSPENDED");
}
