use async_trait::async_trait;

use crate::modules::auth::interface::Result;

use super::model::Class;

#[async_trait]
pub trait ClassRepository: Send + Sync {
    async fn create(&self, class: &Class) -> Result<()>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Class>>;
    async fn list(&self) -> Result<Vec<Class>>;
    async fn delete(&self, id: &str) -> Result<()>;
}
