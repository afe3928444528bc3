use axum::http::StatusCode;
use serde_json::json;

use crate::common::{test_email, test_password, TestContext};

async fn create_student(ctx: &TestContext, admin: &str) -> String {
    let response = ctx
        .server
        .post("/users")
        .authorization_bearer(admin)
        .json(&json!({
            "email": test_email(),
            "full_name": "Extra Student",
            "password": test_password(),
            "role": "STUDENT"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn teacher_saves_a_class_day_register() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_token().await;
    let teacher = ctx.teacher_token().await;
    let class_id = ctx.demo_class_id().await;
    let a = ctx.user_id("student@campus.test").await;
    let b = create_student(&ctx, &admin).await;

    let response = ctx
        .server
        .post("/attendance")
        .authorization_bearer(&teacher)
        .json(&json!({
            "class_id": class_id,
            "date": "2026-03-16",
            "entries": [
                {"student_id": a, "status": "PRESENT"},
                {"student_id": b, "status": "LATE"}
            ]
        }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["saved"], 2);

    let listed = ctx
        .server
        .get(&format!("/attendance/class/{class_id}"))
        .authorization_bearer(&teacher)
        .await;
    let body: serde_json::Value = listed.json();
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn a_bad_entry_persists_nothing() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher_token().await;
    let class_id = ctx.demo_class_id().await;
    let a = ctx.user_id("student@campus.test").await;

    let response = ctx
        .server
        .post("/attendance")
        .authorization_bearer(&teacher)
        .json(&json!({
            "class_id": class_id,
            "date": "2026-03-16",
            "entries": [
                {"student_id": a, "status": "PRESENT"},
                {"student_id": "no-such-student", "status": "ABSENT"}
            ]
        }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    // All-or-nothing: the valid first entry must not have landed.
    let listed = ctx
        .server
        .get(&format!("/attendance/class/{class_id}"))
        .authorization_bearer(&teacher)
        .await;
    let body: serde_json::Value = listed.json();
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn duplicate_students_in_one_batch_are_rejected() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher_token().await;
    let class_id = ctx.demo_class_id().await;
    let a = ctx.user_id("student@campus.test").await;

    ctx.server
        .post("/attendance")
        .authorization_bearer(&teacher)
        .json(&json!({
            "class_id": class_id,
            "date": "2026-03-16",
            "entries": [
                {"student_id": a, "status": "PRESENT"},
                {"student_id": a, "status": "ABSENT"}
            ]
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn resaving_a_day_replaces_the_register() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher_token().await;
    let class_id = ctx.demo_class_id().await;
    let a = ctx.user_id("student@campus.test").await;

    for status in ["ABSENT", "PRESENT"] {
        ctx.server
            .post("/attendance")
            .authorization_bearer(&teacher)
            .json(&json!({
                "class_id": class_id,
                "date": "2026-03-16",
                "entries": [{"student_id": a, "status": status}]
            }))
            .await
            .assert_status_ok();
    }

    let listed = ctx
        .server
        .get(&format!("/attendance/student/{a}"))
        .authorization_bearer(&teacher)
        .await;
    let body: serde_json::Value = listed.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["records"][0]["status"], "PRESENT");
}

#[tokio::test]
async fn student_reads_only_their_own_register() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher_token().await;
    let student = ctx.student_token().await;
    let class_id = ctx.demo_class_id().await;
    let a = ctx.user_id("student@campus.test").await;
    let teacher_id = ctx.user_id("teacher@campus.test").await;

    ctx.server
        .post("/attendance")
        .authorization_bearer(&teacher)
        .json(&json!({
            "class_id": class_id,
            "date": "2026-03-16",
            "entries": [{"student_id": a, "status": "PRESENT"}]
        }))
        .await
        .assert_status_ok();

    ctx.server
        .get(&format!("/attendance/student/{a}"))
        .authorization_bearer(&student)
        .await
        .assert_status_ok();
    ctx.server
        .get(&format!("/attendance/student/{teacher_id}"))
        .authorization_bearer(&student)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}
