use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::modules::audit::model::AuditOutcome;
use crate::modules::auth::interface::AuthError;
use crate::modules::auth::model::Role;
use crate::services::guard::AuthSession;
use crate::AppState;

use super::model::Grade;
use super::schema::{
    CreateGradeRequest, DeleteGradeResponse, GradeListResponse, GradeResponse, UpdateGradeRequest,
};

fn validate_marks(marks: f64) -> Result<(), AuthError> {
    if !(0.0..=100.0).contains(&marks) {
        return Err(AuthError::Validation(
            "marks must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

/// POST /grades (admin, teacher)
pub async fn create_grade(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Json(req): Json<CreateGradeRequest>,
) -> Result<(StatusCode, Json<GradeResponse>), AuthError> {
    session.require_role(&[Role::Admin, Role::Teacher])?;
    validate_marks(req.marks)?;

    state
        .users
        .find_by_id(&req.student_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;
    state
        .classes
        .find_by_id(&req.class_id)
        .await?
        .ok_or(AuthError::NotFound)?;

    let grade = Grade::new(
        &req.student_id,
        &req.class_id,
        &req.subject,
        req.marks,
        req.exam_date,
    );
    state.grades.create(&grade).await?;

    state.audit.record(
        Some(&session.principal.id),
        Some(session.principal.role),
        "grades.create",
        "grade",
        Some(&grade.id),
        AuditOutcome::Success,
        json!({"student_id": grade.student_id, "marks": grade.marks}),
    );

    Ok((StatusCode::CREATED, Json(GradeResponse::from(&grade))))
}

/// PUT /grades/{id} (admin, teacher)
pub async fn update_grade(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Path(id): Path<String>,
    Json(req): Json<UpdateGradeRequest>,
) -> Result<Json<GradeResponse>, AuthError> {
    session.require_role(&[Role::Admin, Role::Teacher])?;
    validate_marks(req.marks)?;

    state
        .grades
        .find_by_id(&id)
        .await?
        .ok_or(AuthError::NotFound)?;
    state.grades.update_marks(&id, req.marks).await?;

    state.audit.record(
        Some(&session.principal.id),
        Some(session.principal.role),
        "grades.update",
        "grade",
        Some(&id),
        AuditOutcome::Success,
        json!({"marks": req.marks}),
    );

    let grade = state
        .grades
        .find_by_id(&id)
        .await?
        .ok_or(AuthError::NotFound)?;
    Ok(Json(GradeResponse::from(&grade)))
}

/// DELETE /grades/{id} (admin)
pub async fn delete_grade(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Path(id): Path<String>,
) -> Result<Json<DeleteGradeResponse>, AuthError> {
    session.require_role(&[Role::Admin])?;

    state
        .grades
        .find_by_id(&id)
        .await?
        .ok_or(AuthError::NotFound)?;
    state.grades.delete(&id).await?;

    state.audit.record(
        Some(&session.principal.id),
        Some(session.principal.role),
        "grades.delete",
        "grade",
        Some(&id),
        AuditOutcome::Success,
        serde_json::Value::Null,
    );

    Ok(Json(DeleteGradeResponse {
        message: "Grade deleted",
    }))
}

/// GET /grades/student/{id}: students see only their own records;
/// parents may read (report-card access), staff read anyone's.
pub async fn list_by_student(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Path(student_id): Path<String>,
) -> Result<Json<GradeListResponse>, AuthError> {
    session.require_role(&[Role::Admin, Role::Teacher, Role::Student, Role::Parent])?;
    if session.principal.role == Role::Student && session.principal.id != student_id {
        return Err(AuthError::Forbidden);
    }

    let grades = state.grades.list_by_student(&student_id).await?;
    let grades: Vec<GradeResponse> = grades.iter().map(GradeResponse::from).collect();
    let total = grades.len();
    Ok(Json(GradeListResponse { grades, total }))
}

/// GET /grades/class/{id} (admin, teacher)
pub async fn list_by_class(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Path(class_id): Path<String>,
) -> Result<Json<GradeListResponse>, AuthError> {
    session.require_role(&[Role::Admin, Role::Teacher])?;

    let grades = state.grades.list_by_class(&class_id).await?;
    let grades: Vec<GradeResponse> = grades.iter().map(GradeResponse::from).collect();
    let total = grades.len();
    Ok(Json(GradeListResponse { grades, total }))
}
