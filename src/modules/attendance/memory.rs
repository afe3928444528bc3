use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::modules::auth::interface::Result;

use super::interface::AttendanceRepository;
use super::model::AttendanceRecord;

#[derive(Default)]
pub struct MemoryAttendanceRepository {
    records: RwLock<HashMap<String, AttendanceRecord>>,
}

impl MemoryAttendanceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttendanceRepository for MemoryAttendanceRepository {
    async fn save_day(
        &self,
        class_id: &str,
        date: NaiveDate,
        records: &[AttendanceRecord],
    ) -> Result<()> {
        // Single write-lock section keeps the replace atomic for readers.
        let mut store = self.records.write().await;
        store.retain(|_, r| !(r.class_id == class_id && r.date == date));
        for record in records {
            store.insert(record.id.clone(), record.clone());
        }
        Ok(())
    }

    async fn list_by_student(&self, student_id: &str) -> Result<Vec<AttendanceRecord>> {
        let mut records: Vec<AttendanceRecord> = self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    async fn list_by_class(&self, class_id: &str) -> Result<Vec<AttendanceRecord>> {
        let mut records: Vec<AttendanceRecord> = self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.class_id == class_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }
}
