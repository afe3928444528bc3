use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{MySql, Pool};

use crate::modules::auth::interface::Result;

use super::interface::AttendanceRepository;
use super::model::AttendanceRecord;

#[derive(Clone)]
pub struct MySqlAttendanceRepository {
    pool: Pool<MySql>,
}

impl MySqlAttendanceRepository {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepository for MySqlAttendanceRepository {
    async fn save_day(
        &self,
        class_id: &str,
        date: NaiveDate,
        records: &[AttendanceRecord],
    ) -> Result<()> {
        // One transaction for the whole class-day; any failure rolls back.
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM attendance WHERE class_id = ? AND date = ?")
            .bind(class_id)
            .bind(date)
            .execute(&mut *tx)
            .await?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO attendance (id, student_id, class_id, date, status, created_at)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&record.id)
            .bind(&record.student_id)
            .bind(&record.class_id)
            .bind(record.date)
            .bind(record.status)
            .bind(record.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list_by_student(&self, student_id: &str) -> Result<Vec<AttendanceRecord>> {
        Ok(sqlx::query_as::<_, AttendanceRecord>(
            "SELECT * FROM attendance WHERE student_id = ? ORDER BY date",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_by_class(&self, class_id: &str) -> Result<Vec<AttendanceRecord>> {
        Ok(sqlx::query_as::<_, AttendanceRecord>(
            "SELECT * FROM attendance WHERE class_id = ? ORDER BY date",
        )
        .bind(class_id)
        .fetch_all(&self.pool)
        .await?)
    }
}
