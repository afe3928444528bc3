use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", post(controller::login))
        .route("/verify-2fa", post(controller::verify_2fa))
        .route("/refresh", post(controller::refresh))
        .route("/logout", post(controller::logout))
        .route("/me", get(controller::me))
        .route("/enable-2fa", post(controller::enable_2fa))
        .route("/confirm-2fa", post(controller::confirm_2fa))
        .route("/disable-2fa", post(controller::disable_2fa))
        .route("/forgot-password", post(controller::forgot_password))
        .route("/reset-password", post(controller::reset_password))
}
