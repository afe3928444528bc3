use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::Class;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClassRequest {
    #[validate(length(min = 1, message = "Class name is required"))]
    pub name: String,
    pub teacher_id: String,
}

#[derive(Debug, Serialize)]
pub struct ClassResponse {
    pub id: String,
    pub name: String,
    pub teacher_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Class> for ClassResponse {
    fn from(class: &Class) -> Self {
        Self {
            id: class.id.clone(),
            name: class.name.clone(),
            teacher_id: class.teacher_id.clone(),
            created_at: class.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClassListResponse {
    pub classes: Vec<ClassResponse>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteClassResponse {
    pub message: &'static str,
}
