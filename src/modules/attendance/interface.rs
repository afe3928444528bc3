use async_trait::async_trait;
use chrono::NaiveDate;

use crate::modules::auth::interface::Result;

use super::model::AttendanceRecord;

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Replace one class-day's records atomically: either the whole batch
    /// lands or nothing changes.
    async fn save_day(
        &self,
        class_id: &str,
        date: NaiveDate,
        records: &[AttendanceRecord],
    ) -> Result<()>;
    async fn list_by_student(&self, student_id: &str) -> Result<Vec<AttendanceRecord>>;
    async fn list_by_class(&self, class_id: &str) -> Result<Vec<AttendanceRecord>>;
}
