use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::modules::auth::interface::AuthError;
use crate::modules::auth::model::Role;
use crate::services::aggregation;
use crate::services::guard::AuthSession;
use crate::AppState;

use super::schema::{
    ClassGradeAnalytics, SchoolOverview, StudentAttendanceAnalytics, StudentTrendAnalytics,
};

/// GET /analytics/class/{id}/grades (admin, teacher)
pub async fn class_grade_distribution(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Path(class_id): Path<String>,
) -> Result<Json<ClassGradeAnalytics>, AuthError> {
    session.require_role(&[Role::Admin, Role::Teacher])?;

    state
        .classes
        .find_by_id(&class_id)
        .await?
        .ok_or(AuthError::NotFound)?;
    let grades = state.grades.list_by_class(&class_id).await?;
    let marks: Vec<f64> = grades.iter().map(|g| g.marks).collect();

    Ok(Json(ClassGradeAnalytics {
        class_id,
        distribution: aggregation::grade_distribution(&marks),
    }))
}

/// GET /analytics/student/{id}/attendance (admin, teacher)
pub async fn student_attendance_summary(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Path(student_id): Path<String>,
) -> Result<Json<StudentAttendanceAnalytics>, AuthError> {
    session.require_role(&[Role::Admin, Role::Teacher])?;

    let records = state.attendance.list_by_student(&student_id).await?;
    let statuses: Vec<_> = records.iter().map(|r| r.status).collect();

    Ok(Json(StudentAttendanceAnalytics {
        student_id,
        summary: aggregation::attendance_summary(&statuses),
    }))
}

/// GET /analytics/student/{id}/trend (admin, teacher)
pub async fn student_performance_trend(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Path(student_id): Path<String>,
) -> Result<Json<StudentTrendAnalytics>, AuthError> {
    session.require_role(&[Role::Admin, Role::Teacher])?;

    let grades = state.grades.list_by_student(&student_id).await?;
    let rows: Vec<_> = grades.iter().map(|g| (g.exam_date, g.marks)).collect();

    Ok(Json(StudentTrendAnalytics {
        student_id,
        trend: aggregation::monthly_trend(&rows),
    }))
}

/// GET /analytics/overview (admin, teacher)
pub async fn school_overview(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
) -> Result<Json<SchoolOverview>, AuthError> {
    session.require_role(&[Role::Admin, Role::Teacher])?;

    let users = state.users.list().await?;
    let classes = state.classes.list().await?;

    let mut grades_recorded = 0usize;
    let mut marks_sum = 0.0f64;
    for class in &classes {
        let grades = state.grades.list_by_class(&class.id).await?;
        grades_recorded += grades.len();
        marks_sum += grades.iter().map(|g| g.marks).sum::<f64>();
    }
    let average_marks = if grades_recorded == 0 {
        0.0
    } else {
        marks_sum / grades_recorded as f64
    };

    Ok(Json(SchoolOverview {
        students: users.iter().filter(|u| u.role == Role::Student).count(),
        teachers: users.iter().filter(|u| u.role == Role::Teacher).count(),
        classes: classes.len(),
        grades_recorded,
        average_marks,
    }))
}
