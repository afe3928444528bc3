use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

/// One row per (student, class, date).
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    pub class_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
}

impl AttendanceRecord {
    pub fn new(
        student_id: &str,
        class_id: &str,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            class_id: class_id.to_string(),
            date,
            status,
            created_at: Utc::now(),
        }
    }
}
