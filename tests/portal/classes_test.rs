use axum::http::StatusCode;
use serde_json::json;

use crate::common::TestContext;

#[tokio::test]
async fn admin_creates_a_class_for_a_teacher() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_token().await;
    let teacher_id = ctx.user_id("teacher@campus.test").await;

    let response = ctx
        .server
        .post("/classes")
        .authorization_bearer(&admin)
        .json(&json!({"name": "Physics 11B", "teacher_id": teacher_id}))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "Physics 11B");
}

#[tokio::test]
async fn class_teacher_must_hold_the_teacher_role() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_token().await;
    let student_id = ctx.user_id("student@campus.test").await;

    ctx.server
        .post("/classes")
        .authorization_bearer(&admin)
        .json(&json!({"name": "Rogue Class", "teacher_id": student_id}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn students_can_list_but_not_create() {
    let ctx = TestContext::new().await;
    let student = ctx.student_token().await;
    let teacher_id = ctx.user_id("teacher@campus.test").await;

    let listed = ctx.server.get("/classes").authorization_bearer(&student).await;
    listed.assert_status_ok();
    let body: serde_json::Value = listed.json();
    assert_eq!(body["total"], 1); // the seeded demo class

    ctx.server
        .post("/classes")
        .authorization_bearer(&student)
        .json(&json!({"name": "Self Service", "teacher_id": teacher_id}))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn only_admin_deletes_classes() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_token().await;
    let teacher = ctx.teacher_token().await;
    let class_id = ctx.demo_class_id().await;

    ctx.server
        .delete(&format!("/classes/{class_id}"))
        .authorization_bearer(&teacher)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    ctx.server
        .delete(&format!("/classes/{class_id}"))
        .authorization_bearer(&admin)
        .await
        .assert_status_ok();

    let listed = ctx.server.get("/classes").authorization_bearer(&admin).await;
    let body: serde_json::Value = listed.json();
    assert_eq!(body["total"], 0);
}
