use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Grade {
    pub id: String,
    pub student_id: String,
    pub class_id: String,
    pub subject: String,
    /// 0.0..=100.0; letter grades are derived, never stored.
    pub marks: f64,
    pub exam_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Grade {
    pub fn new(
        student_id: &str,
        class_id: &str,
        subject: &str,
        marks: f64,
        exam_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            class_id: class_id.to_string(),
            subject: subject.to_string(),
            marks,
            exam_date,
            created_at: now,
            updated_at: now,
        }
    }
}
