use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn attendance_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(controller::save_day))
        .route("/student/{id}", get(controller::list_by_student))
        .route("/class/{id}", get(controller::list_by_class))
}
