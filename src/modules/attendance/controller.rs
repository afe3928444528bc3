use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;

use crate::modules::audit::model::AuditOutcome;
use crate::modules::auth::interface::AuthError;
use crate::modules::auth::model::Role;
use crate::services::guard::AuthSession;
use crate::AppState;

use super::model::AttendanceRecord;
use super::schema::{
    AttendanceListResponse, AttendanceRecordResponse, SaveAttendanceRequest,
    SaveAttendanceResponse,
};

/// POST /attendance (admin, teacher)
///
/// All-or-nothing: the whole batch is validated before the repository is
/// touched, and the repository write itself is atomic, so a bad entry in
/// the middle leaves no partial register behind.
pub async fn save_day(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Json(req): Json<SaveAttendanceRequest>,
) -> Result<Json<SaveAttendanceResponse>, AuthError> {
    session.require_role(&[Role::Admin, Role::Teacher])?;

    if req.entries.is_empty() {
        return Err(AuthError::Validation(
            "attendance batch is empty".to_string(),
        ));
    }

    state
        .classes
        .find_by_id(&req.class_id)
        .await?
        .ok_or(AuthError::NotFound)?;

    let mut seen = HashSet::new();
    for entry in &req.entries {
        if !seen.insert(entry.student_id.as_str()) {
            return Err(AuthError::Validation(format!(
                "duplicate student {} in batch",
                entry.student_id
            )));
        }
        let student = state
            .users
            .find_by_id(&entry.student_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if student.role != Role::Student {
            return Err(AuthError::Validation(format!(
                "{} is not a student account",
                entry.student_id
            )));
        }
    }

    let records: Vec<AttendanceRecord> = req
        .entries
        .iter()
        .map(|e| AttendanceRecord::new(&e.student_id, &req.class_id, req.date, e.status))
        .collect();
    state
        .attendance
        .save_day(&req.class_id, req.date, &records)
        .await?;

    state.audit.record(
        Some(&session.principal.id),
        Some(session.principal.role),
        "attendance.save_day",
        "class",
        Some(&req.class_id),
        AuditOutcome::Success,
        json!({"date": req.date.to_string(), "entries": records.len()}),
    );

    Ok(Json(SaveAttendanceResponse {
        message: "Attendance saved",
        saved: records.len(),
    }))
}

/// GET /attendance/student/{id}: students read their own register only.
pub async fn list_by_student(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Path(student_id): Path<String>,
) -> Result<Json<AttendanceListResponse>, AuthError> {
    session.require_role(&[Role::Admin, Role::Teacher, Role::Student])?;
    if session.principal.role == Role::Student && session.principal.id != student_id {
        return Err(AuthError::Forbidden);
    }

    let records = state.attendance.list_by_student(&student_id).await?;
    let records: Vec<AttendanceRecordResponse> =
        records.iter().map(AttendanceRecordResponse::from).collect();
    let total = records.len();
    Ok(Json(AttendanceListResponse { records, total }))
}

/// GET /attendance/class/{id} (admin, teacher)
pub async fn list_by_class(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Path(class_id): Path<String>,
) -> Result<Json<AttendanceListResponse>, AuthError> {
    session.require_role(&[Role::Admin, Role::Teacher])?;

    let records = state.attendance.list_by_class(&class_id).await?;
    let records: Vec<AttendanceRecordResponse> =
        records.iter().map(AttendanceRecordResponse::from).collect();
    let total = records.len();
    Ok(Json(AttendanceListResponse { records, total }))
}
