use axum::http::StatusCode;
use serde_json::json;

use campus_api::services::totp;

use crate::common::{unique_ip, TestContext};

async fn enroll(ctx: &TestContext, token: &str) -> (String, Vec<String>) {
    let enable = ctx
        .server
        .post("/auth/enable-2fa")
        .authorization_bearer(token)
        .await;
    enable.assert_status_ok();
    let body: serde_json::Value = enable.json();
    let secret = body["secret"].as_str().unwrap().to_string();
    assert!(body["otpauth_url"].as_str().unwrap().starts_with("otpauth://"));

    let code = totp::current_code(&secret).unwrap();
    let confirm = ctx
        .server
        .post("/auth/confirm-2fa")
        .authorization_bearer(token)
        .json(&json!({"code": code}))
        .await;
    confirm.assert_status_ok();
    let body: serde_json::Value = confirm.json();
    let codes: Vec<String> = body["recovery_codes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap().to_string())
        .collect();
    (secret, codes)
}

#[tokio::test]
async fn wrong_enrollment_code_leaves_the_flag_off() {
    let ctx = TestContext::new().await;
    let token = ctx.student_token().await;

    ctx.server
        .post("/auth/enable-2fa")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    let confirm = ctx
        .server
        .post("/auth/confirm-2fa")
        .authorization_bearer(&token)
        .json(&json!({"code": "000000"}))
        .await;
    confirm.assert_status(StatusCode::BAD_REQUEST);

    let me = ctx.server.get("/auth/me").authorization_bearer(&token).await;
    let body: serde_json::Value = me.json();
    assert_eq!(body["two_factor_enabled"], false);
}

#[tokio::test]
async fn successful_enrollment_returns_twelve_unique_recovery_codes() {
    let ctx = TestContext::new().await;
    let token = ctx.student_token().await;

    let (_, codes) = enroll(&ctx, &token).await;
    assert_eq!(codes.len(), 12);
    let unique: std::collections::HashSet<&String> = codes.iter().collect();
    assert_eq!(unique.len(), 12);

    let me = ctx.server.get("/auth/me").authorization_bearer(&token).await;
    let body: serde_json::Value = me.json();
    assert_eq!(body["two_factor_enabled"], true);
}

#[tokio::test]
async fn login_with_2fa_requires_the_second_factor() {
    let ctx = TestContext::new().await;
    let token = ctx.student_token().await;
    let (secret, _) = enroll(&ctx, &token).await;

    let login = ctx
        .server
        .post("/auth/login")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({
            "email": "student@campus.test",
            "password": "Student@12345"
        }))
        .await;
    login.assert_status_ok();
    let body: serde_json::Value = login.json();
    assert_eq!(body["requires_2fa"], true);
    // No session yet.
    assert!(body.get("access_token").is_none());
    assert!(login.maybe_cookie("token").is_none());
    let temp_token = body["temp_token"].as_str().unwrap();

    let code = totp::current_code(&secret).unwrap();
    let verify = ctx
        .server
        .post("/auth/verify-2fa")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({"temp_token": temp_token, "code": code}))
        .await;
    verify.assert_status_ok();
    let body: serde_json::Value = verify.json();
    assert!(body.get("access_token").is_some());
}

#[tokio::test]
async fn wrong_code_keeps_the_challenge_alive() {
    let ctx = TestContext::new().await;
    let token = ctx.student_token().await;
    let (secret, _) = enroll(&ctx, &token).await;

    let login = ctx
        .server
        .post("/auth/login")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({
            "email": "student@campus.test",
            "password": "Student@12345"
        }))
        .await;
    let body: serde_json::Value = login.json();
    let temp_token = body["temp_token"].as_str().unwrap().to_string();

    ctx.server
        .post("/auth/verify-2fa")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({"temp_token": temp_token, "code": "000000"}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    // Same challenge, correct code: still accepted.
    let code = totp::current_code(&secret).unwrap();
    ctx.server
        .post("/auth/verify-2fa")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({"temp_token": temp_token, "code": code}))
        .await
        .assert_status_ok();
}

async fn open_challenge(ctx: &TestContext) -> String {
    let login = ctx
        .server
        .post("/auth/login")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({
            "email": "student@campus.test",
            "password": "Student@12345"
        }))
        .await;
    let body: serde_json::Value = login.json();
    body["temp_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn each_recovery_code_works_exactly_once() {
    let ctx = TestContext::new().await;
    let token = ctx.student_token().await;
    let (_, codes) = enroll(&ctx, &token).await;
    let recovery_code = &codes[0];

    let temp_token = open_challenge(&ctx).await;
    ctx.server
        .post("/auth/verify-2fa")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({"temp_token": temp_token, "code": recovery_code}))
        .await
        .assert_status_ok();

    // Second use of the same recovery code fails.
    let temp_token = open_challenge(&ctx).await;
    ctx.server
        .post("/auth/verify-2fa")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({"temp_token": temp_token, "code": recovery_code}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn a_consumed_challenge_cannot_be_replayed() {
    let ctx = TestContext::new().await;
    let token = ctx.student_token().await;
    let (secret, _) = enroll(&ctx, &token).await;

    let login = ctx
        .server
        .post("/auth/login")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({
            "email": "student@campus.test",
            "password": "Student@12345"
        }))
        .await;
    let body: serde_json::Value = login.json();
    let temp_token = body["temp_token"].as_str().unwrap().to_string();

    let code = totp::current_code(&secret).unwrap();
    ctx.server
        .post("/auth/verify-2fa")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({"temp_token": &temp_token, "code": &code}))
        .await
        .assert_status_ok();

    ctx.server
        .post("/auth/verify-2fa")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({"temp_token": &temp_token, "code": &code}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn racing_verifications_issue_at_most_one_session() {
    let ctx = TestContext::new().await;
    let token = ctx.student_token().await;
    let (secret, _) = enroll(&ctx, &token).await;

    let temp_token = open_challenge(&ctx).await;
    let code = totp::current_code(&secret).unwrap();

    let (first, second) = tokio::join!(
        ctx.server
            .post("/auth/verify-2fa")
            .add_header("X-Forwarded-For", unique_ip())
            .json(&json!({"temp_token": &temp_token, "code": &code})),
        ctx.server
            .post("/auth/verify-2fa")
            .add_header("X-Forwarded-For", unique_ip())
            .json(&json!({"temp_token": &temp_token, "code": &code})),
    );

    let statuses = [first.status_code(), second.status_code()];
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::OK).count(),
        1,
        "one verification must win the challenge, got {statuses:?}"
    );
    assert!(statuses.contains(&StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn disable_requires_a_valid_code() {
    let ctx = TestContext::new().await;
    let token = ctx.student_token().await;
    let (secret, _) = enroll(&ctx, &token).await;

    ctx.server
        .post("/auth/disable-2fa")
        .authorization_bearer(&token)
        .json(&json!({"code": "000000"}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let code = totp::current_code(&secret).unwrap();
    ctx.server
        .post("/auth/disable-2fa")
        .authorization_bearer(&token)
        .json(&json!({"code": code}))
        .await
        .assert_status_ok();

    let me = ctx.server.get("/auth/me").authorization_bearer(&token).await;
    let body: serde_json::Value = me.json();
    assert_eq!(body["two_factor_enabled"], false);
}
