use async_trait::async_trait;

use crate::modules::auth::interface::Result;

use super::model::Grade;

#[async_trait]
pub trait GradeRepository: Send + Sync {
    async fn create(&self, grade: &Grade) -> Result<()>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Grade>>;
    async fn update_marks(&self, id: &str, marks: f64) -> Result<()>;
    async fn list_by_student(&self, student_id: &str) -> Result<Vec<Grade>>;
    async fn list_by_class(&self, class_id: &str) -> Result<Vec<Grade>>;
    async fn delete(&self, id: &str) -> Result<()>;
}
