use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::modules::auth::interface::Result;

use super::interface::AuditLogRepository;
use super::model::AuditLogEntry;

#[derive(Default)]
pub struct MemoryAuditLogRepository {
    entries: RwLock<Vec<AuditLogEntry>>,
}

impl MemoryAuditLogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditLogRepository for MemoryAuditLogRepository {
    async fn append(&self, entry: &AuditLogEntry) -> Result<()> {
        self.entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<AuditLogEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().rev().take(limit).cloned().collect())
    }
}
