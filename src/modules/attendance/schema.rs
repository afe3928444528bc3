use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::model::{AttendanceRecord, AttendanceStatus};

#[derive(Debug, Deserialize)]
pub struct AttendanceEntry {
    pub student_id: String,
    pub status: AttendanceStatus,
}

/// Full register for one class on one day.
#[derive(Debug, Deserialize)]
pub struct SaveAttendanceRequest {
    pub class_id: String,
    pub date: NaiveDate,
    pub entries: Vec<AttendanceEntry>,
}

#[derive(Debug, Serialize)]
pub struct AttendanceRecordResponse {
    pub id: String,
    pub student_id: String,
    pub class_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&AttendanceRecord> for AttendanceRecordResponse {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            id: record.id.clone(),
            student_id: record.student_id.clone(),
            class_id: record.class_id.clone(),
            date: record.date,
            status: record.status,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaveAttendanceResponse {
    pub message: &'static str,
    pub saved: usize,
}

#[derive(Debug, Serialize)]
pub struct AttendanceListResponse {
    pub records: Vec<AttendanceRecordResponse>,
    pub total: usize,
}
