use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn grade_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(controller::create_grade))
        .route(
            "/{id}",
            put(controller::update_grade).delete(controller::delete_grade),
        )
        .route("/student/{id}", get(controller::list_by_student))
        .route("/class/{id}", get(controller::list_by_class))
}
