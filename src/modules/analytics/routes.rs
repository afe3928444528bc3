use axum::{routing::get, Router};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn analytics_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/class/{id}/grades",
            get(controller::class_grade_distribution),
        )
        .route(
            "/student/{id}/attendance",
            get(controller::student_attendance_summary),
        )
        .route(
            "/student/{id}/trend",
            get(controller::student_performance_trend),
        )
        .route("/overview", get(controller::school_overview))
}
