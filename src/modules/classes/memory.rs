use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::modules::auth::interface::Result;

use super::interface::ClassRepository;
use super::model::Class;

#[derive(Default)]
pub struct MemoryClassRepository {
    classes: RwLock<HashMap<String, Class>>,
}

impl MemoryClassRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClassRepository for MemoryClassRepository {
    async fn create(&self, class: &Class) -> Result<()> {
        self.classes
            .write()
            .await
            .insert(class.id.clone(), class.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Class>> {
        Ok(self.classes.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Class>> {
        let mut classes: Vec<Class> = self.classes.read().await.values().cloned().collect();
        classes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(classes)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.classes.write().await.remove(id);
        Ok(())
    }
}
