use axum::http::StatusCode;
use serde_json::json;

use crate::common::{unique_ip, TestContext};

#[tokio::test]
async fn login_outcomes_show_up_in_the_audit_log() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_token().await;

    ctx.server
        .post("/auth/login")
        .add_header("X-Forwarded-For", unique_ip())
        .json(&json!({
            "email": "student@campus.test",
            "password": "WrongPassword1!"
        }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    // The writer is asynchronous; give it a moment.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let response = ctx.server.get("/audit").authorization_bearer(&admin).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let entries = body["entries"].as_array().unwrap();
    assert!(entries
        .iter()
        .any(|e| e["action"] == "auth.login" && e["outcome"] == "FAILURE"));
    assert!(entries
        .iter()
        .any(|e| e["action"] == "auth.login" && e["outcome"] == "SUCCESS"));
}

#[tokio::test]
async fn admin_mutations_are_audited() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_token().await;
    let student_id = ctx.user_id("student@campus.test").await;

    ctx.server
        .put(&format!("/users/{student_id}/status"))
        .authorization_bearer(&admin)
        .json(&json!({"status": "SUSPENDED"}))
        .await
        .assert_status_ok();

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let response = ctx.server.get("/audit").authorization_bearer(&admin).await;
    let body: serde_json::Value = response.json();
    let entries = body["entries"].as_array().unwrap();
    assert!(entries.iter().any(|e| e["action"] == "users.set_status"));
}

#[tokio::test]
async fn audit_log_is_admin_only() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher_token().await;

    ctx.server
        .get("/audit")
        .authorization_bearer(&teacher)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn limit_query_caps_the_listing() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_token().await;

    for _ in 0..3 {
        ctx.server
            .post("/auth/login")
            .add_header("X-Forwarded-For", unique_ip())
            .json(&json!({
                "email": "student@campus.test",
                "password": "WrongPassword1!"
            }))
            .await;
    }
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let response = ctx
        .server
        .get("/audit")
        .add_query_param("limit", 2)
        .authorization_bearer(&admin)
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 2);
}
