use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Class {
    pub id: String,
    pub name: String,
    pub teacher_id: String,
    pub created_at: DateTime<Utc>,
}

impl Class {
    pub fn new(name: &str, teacher_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            teacher_id: teacher_id.to_string(),
            created_at: Utc::now(),
        }
    }
}
