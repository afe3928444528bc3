use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::modules::auth::interface::Result;

use super::interface::GradeRepository;
use super::model::Grade;

#[derive(Default)]
pub struct MemoryGradeRepository {
    grades: RwLock<HashMap<String, Grade>>,
}

impl MemoryGradeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GradeRepository for MemoryGradeRepository {
    async fn create(&self, grade: &Grade) -> Result<()> {
        self.grades
            .write()
            .await
            .insert(grade.id.clone(), grade.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Grade>> {
        Ok(self.grades.read().await.get(id).cloned())
    }

    async fn update_marks(&self, id: &str, marks: f64) -> Result<()> {
        if let Some(grade) = self.grades.write().await.get_mut(id) {
            grade.marks = marks;
            grade.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn list_by_student(&self, student_id: &str) -> Result<Vec<Grade>> {
        let mut grades: Vec<Grade> = self
            .grades
            .read()
            .await
            .values()
            .filter(|g| g.student_id == student_id)
            .cloned()
            .collect();
        grades.sort_by_key(|g| g.exam_date);
        Ok(grades)
    }

    async fn list_by_class(&self, class_id: &str) -> Result<Vec<Grade>> {
        let mut grades: Vec<Grade> = self
            .grades
            .read()
            .await
            .values()
            .filter(|g| g.class_id == class_id)
            .cloned()
            .collect();
        grades.sort_by_key(|g| g.exam_date);
        Ok(grades)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.grades.write().await.remove(id);
        Ok(())
    }
}
