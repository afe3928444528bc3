use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::modules::audit::model::AuditOutcome;
use crate::modules::auth::interface::AuthError;
use crate::modules::auth::model::{Role, User, UserStatus};
use crate::modules::auth::schema::UserResponse;
use crate::services::guard::AuthSession;
use crate::services::hashing;
use crate::AppState;

use super::schema::{CreateUserRequest, DeleteUserResponse, SetStatusRequest, UserListResponse};

const LIST_TIMEOUT: Duration = Duration::from_secs(5);

/// POST /users (admin)
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AuthError> {
    session.require_role(&[Role::Admin])?;
    req.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;
    hashing::validate_password_strength(&req.password).map_err(AuthError::WeakPassword)?;

    let password_hash =
        hashing::hash_password(&req.password).map_err(|e| AuthError::Internal(e.to_string()))?;
    let user = User::new(&req.email, &req.full_name, password_hash, req.role);
    state.users.create(&user).await?;

    state.audit.record(
        Some(&session.principal.id),
        Some(session.principal.role),
        "users.create",
        "user",
        Some(&user.id),
        AuditOutcome::Success,
        json!({"role": user.role.as_str()}),
    );

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /users (admin). The listing runs under an explicit timeout so a
/// slow store degrades into a clean 500 instead of a hung connection.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
) -> Result<Json<UserListResponse>, AuthError> {
    session.require_role(&[Role::Admin])?;

    let users = tokio::time::timeout(LIST_TIMEOUT, state.users.list())
        .await
        .map_err(|_| AuthError::Internal("user listing timed out".to_string()))??;

    let users: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    let total = users.len();
    Ok(Json(UserListResponse { users, total }))
}

/// PUT /users/{id}/status (admin). Suspension revokes refresh tokens and,
/// via the updated_at bump, fences out already-issued access tokens.
pub async fn set_status(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Path(id): Path<String>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<UserResponse>, AuthError> {
    session.require_role(&[Role::Admin])?;

    state
        .users
        .find_by_id(&id)
        .await?
        .ok_or(AuthError::UserNotFound)?;
    state.users.set_status(&id, req.status).await?;
    if req.status == UserStatus::Suspended {
        state.refresh_tokens.revoke_all_for_user(&id).await?;
    }

    state.audit.record(
        Some(&session.principal.id),
        Some(session.principal.role),
        "users.set_status",
        "user",
        Some(&id),
        AuditOutcome::Success,
        json!({"status": format!("{:?}", req.status).to_uppercase()}),
    );

    let user = state
        .users
        .find_by_id(&id)
        .await?
        .ok_or(AuthError::UserNotFound)?;
    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /users/{id} (admin)
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Path(id): Path<String>,
) -> Result<Json<DeleteUserResponse>, AuthError> {
    session.require_role(&[Role::Admin])?;

    state
        .users
        .find_by_id(&id)
        .await?
        .ok_or(AuthError::UserNotFound)?;
    state.refresh_tokens.revoke_all_for_user(&id).await?;
    state.backup_codes.delete_for_user(&id).await?;
    state.password_resets.delete_for_user(&id).await?;
    state.users.delete(&id).await?;

    state.audit.record(
        Some(&session.principal.id),
        Some(session.principal.role),
        "users.delete",
        "user",
        Some(&id),
        AuditOutcome::Success,
        serde_json::Value::Null,
    );

    Ok(Json(DeleteUserResponse {
        message: "User deleted",
    }))
}
