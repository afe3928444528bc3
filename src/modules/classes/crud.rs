use async_trait::async_trait;
use sqlx::{MySql, Pool};

use crate::modules::auth::interface::Result;

use super::interface::ClassRepository;
use super::model::Class;

#[derive(Clone)]
pub struct MySqlClassRepository {
    pool: Pool<MySql>,
}

impl MySqlClassRepository {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassRepository for MySqlClassRepository {
    async fn create(&self, class: &Class) -> Result<()> {
        sqlx::query(
            "INSERT INTO classes (id, name, teacher_id, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&class.id)
        .bind(&class.name)
        .bind(&class.teacher_id)
        .bind(class.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Class>> {
        Ok(sqlx::query_as::<_, Class>("SELECT * FROM classes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list(&self) -> Result<Vec<Class>> {
        Ok(
            sqlx::query_as::<_, Class>("SELECT * FROM classes ORDER BY name")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM classes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
