use async_trait::async_trait;
use sqlx::{MySql, Pool};

use crate::modules::auth::interface::Result;

use super::interface::GradeRepository;
use super::model::Grade;

#[derive(Clone)]
pub struct MySqlGradeRepository {
    pool: Pool<MySql>,
}

impl MySqlGradeRepository {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GradeRepository for MySqlGradeRepository {
    async fn create(&self, grade: &Grade) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO grades (id, student_id, class_id, subject, marks, exam_date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&grade.id)
        .bind(&grade.student_id)
        .bind(&grade.class_id)
        .bind(&grade.subject)
        .bind(grade.marks)
        .bind(grade.exam_date)
        .bind(grade.created_at)
        .bind(grade.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Grade>> {
        Ok(sqlx::query_as::<_, Grade>("SELECT * FROM grades WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update_marks(&self, id: &str, marks: f64) -> Result<()> {
        sqlx::query("UPDATE grades SET marks = ?, updated_at = NOW() WHERE id = ?")
            .bind(marks)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_by_student(&self, student_id: &str) -> Result<Vec<Grade>> {
        Ok(sqlx::query_as::<_, Grade>(
            "SELECT * FROM grades WHERE student_id = ? ORDER BY exam_date",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_by_class(&self, class_id: &str) -> Result<Vec<Grade>> {
        Ok(sqlx::query_as::<_, Grade>(
            "SELECT * FROM grades WHERE class_id = ? ORDER BY exam_date",
        )
        .bind(class_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM grades WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
