use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::services::aggregation::LetterGrade;

use super::model::Grade;

#[derive(Debug, Deserialize)]
pub struct CreateGradeRequest {
    pub student_id: String,
    pub class_id: String,
    pub subject: String,
    pub marks: f64,
    pub exam_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct UpdateGradeRequest {
    pub marks: f64,
}

#[derive(Debug, Serialize)]
pub struct GradeResponse {
    pub id: String,
    pub student_id: String,
    pub class_id: String,
    pub subject: String,
    pub marks: f64,
    /// Derived on the way out; never persisted.
    pub letter: LetterGrade,
    pub exam_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Grade> for GradeResponse {
    fn from(grade: &Grade) -> Self {
        Self {
            id: grade.id.clone(),
            student_id: grade.student_id.clone(),
            class_id: grade.class_id.clone(),
            subject: grade.subject.clone(),
            marks: grade.marks,
            letter: LetterGrade::from_marks(grade.marks),
            exam_date: grade.exam_date,
            created_at: grade.created_at,
            updated_at: grade.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GradeListResponse {
    pub grades: Vec<GradeResponse>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteGradeResponse {
    pub message: &'static str,
}
