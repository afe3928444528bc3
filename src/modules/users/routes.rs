use axum::{
    routing::{delete, post, put},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(controller::create_user).get(controller::list_users))
        .route("/{id}/status", put(controller::set_status))
        .route("/{id}", delete(controller::delete_user))
}
