use axum::{
    routing::{delete, post},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn class_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            post(controller::create_class).get(controller::list_classes),
        )
        .route("/{id}", delete(controller::delete_class))
}
