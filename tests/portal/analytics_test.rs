use axum::http::StatusCode;
use serde_json::json;

use crate::common::TestContext;

async fn seed_grades(ctx: &TestContext, teacher: &str, marks: &[f64]) -> String {
    let class_id = ctx.demo_class_id().await;
    let student_id = ctx.user_id("student@campus.test").await;
    for (i, m) in marks.iter().enumerate() {
        ctx.server
            .post("/grades")
            .authorization_bearer(teacher)
            .json(&json!({
                "student_id": student_id,
                "class_id": class_id,
                "subject": format!("Subject {i}"),
                "marks": m,
                "exam_date": format!("2026-{:02}-10", (i % 12) + 1)
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }
    class_id
}

#[tokio::test]
async fn class_distribution_buckets_by_letter() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher_token().await;
    let class_id = seed_grades(&ctx, &teacher, &[95.0, 90.0, 83.0, 72.0, 65.0, 55.0, 40.0]).await;

    let response = ctx
        .server
        .get(&format!("/analytics/class/{class_id}/grades"))
        .authorization_bearer(&teacher)
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let dist = &body["distribution"];
    assert_eq!(dist["a_plus"], 2);
    assert_eq!(dist["a"], 1);
    assert_eq!(dist["b"], 1);
    assert_eq!(dist["c"], 1);
    assert_eq!(dist["d"], 1);
    assert_eq!(dist["f"], 1);
    assert_eq!(dist["total"], 7);
}

#[tokio::test]
async fn attendance_summary_counts_late_separately() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher_token().await;
    let class_id = ctx.demo_class_id().await;
    let student_id = ctx.user_id("student@campus.test").await;

    for (date, status) in [
        ("2026-03-02", "PRESENT"),
        ("2026-03-03", "PRESENT"),
        ("2026-03-04", "LATE"),
        ("2026-03-05", "ABSENT"),
    ] {
        ctx.server
            .post("/attendance")
            .authorization_bearer(&teacher)
            .json(&json!({
                "class_id": class_id,
                "date": date,
                "entries": [{"student_id": student_id, "status": status}]
            }))
            .await
            .assert_status_ok();
    }

    let response = ctx
        .server
        .get(&format!("/analytics/student/{student_id}/attendance"))
        .authorization_bearer(&teacher)
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let summary = &body["summary"];
    assert_eq!(summary["present"], 2);
    assert_eq!(summary["late"], 1);
    assert_eq!(summary["absent"], 1);
    assert_eq!(summary["total"], 4);
    // LATE does not count toward the rate.
    assert!((summary["rate"].as_f64().unwrap() - 0.5).abs() < 1e-9);
}

#[tokio::test]
async fn trend_is_grouped_by_month_in_order() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher_token().await;
    seed_grades(&ctx, &teacher, &[80.0, 90.0, 60.0]).await;
    let student_id = ctx.user_id("student@campus.test").await;

    let response = ctx
        .server
        .get(&format!("/analytics/student/{student_id}/trend"))
        .authorization_bearer(&teacher)
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let trend = body["trend"].as_array().unwrap();
    assert_eq!(trend.len(), 3);
    assert_eq!(trend[0]["period"], "2026-01");
    assert_eq!(trend[1]["period"], "2026-02");
    assert_eq!(trend[2]["period"], "2026-03");
}

#[tokio::test]
async fn overview_is_staff_only() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_token().await;
    let student = ctx.student_token().await;

    let response = ctx
        .server
        .get("/analytics/overview")
        .authorization_bearer(&admin)
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["students"], 1);
    assert_eq!(body["teachers"], 1);
    assert_eq!(body["classes"], 1);

    ctx.server
        .get("/analytics/overview")
        .authorization_bearer(&student)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}
