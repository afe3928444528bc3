use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::modules::audit::model::AuditOutcome;
use crate::modules::auth::interface::AuthError;
use crate::modules::auth::model::Role;
use crate::services::guard::AuthSession;
use crate::AppState;

use super::schema::{ClassListResponse, ClassResponse, CreateClassRequest, DeleteClassResponse};

/// POST /classes (admin). The named teacher must exist and hold the
/// TEACHER role.
pub async fn create_class(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Json(req): Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<ClassResponse>), AuthError> {
    session.require_role(&[Role::Admin])?;
    req.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let teacher = state
        .users
        .find_by_id(&req.teacher_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;
    if teacher.role != Role::Teacher {
        return Err(AuthError::Validation(
            "teacher_id must reference a TEACHER account".to_string(),
        ));
    }

    let class = super::model::Class::new(&req.name, &req.teacher_id);
    state.classes.create(&class).await?;

    state.audit.record(
        Some(&session.principal.id),
        Some(session.principal.role),
        "classes.create",
        "class",
        Some(&class.id),
        AuditOutcome::Success,
        json!({"name": class.name}),
    );

    Ok((StatusCode::CREATED, Json(ClassResponse::from(&class))))
}

/// GET /classes (admin, teacher, student)
pub async fn list_classes(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
) -> Result<Json<ClassListResponse>, AuthError> {
    session.require_role(&[Role::Admin, Role::Teacher, Role::Student])?;

    let classes = state.classes.list().await?;
    let classes: Vec<ClassResponse> = classes.iter().map(ClassResponse::from).collect();
    let total = classes.len();
    Ok(Json(ClassListResponse { classes, total }))
}

/// DELETE /classes/{id} (admin)
pub async fn delete_class(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Path(id): Path<String>,
) -> Result<Json<DeleteClassResponse>, AuthError> {
    session.require_role(&[Role::Admin])?;

    state
        .classes
        .find_by_id(&id)
        .await?
        .ok_or(AuthError::NotFound)?;
    state.classes.delete(&id).await?;

    state.audit.record(
        Some(&session.principal.id),
        Some(session.principal.role),
        "classes.delete",
        "class",
        Some(&id),
        AuditOutcome::Success,
        serde_json::Value::Null,
    );

    Ok(Json(DeleteClassResponse {
        message: "Class deleted",
    }))
}
