use async_trait::async_trait;

use crate::modules::auth::interface::Result;

use super::model::AuditLogEntry;

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn append(&self, entry: &AuditLogEntry) -> Result<()>;
    /// Newest first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<AuditLogEntry>>;
}
