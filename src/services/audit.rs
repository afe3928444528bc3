use std::sync::Arc;

use tokio::sync::mpsc;

use crate::modules::audit::interface::AuditLogRepository;
use crate::modules::audit::model::{AuditLogEntry, AuditOutcome};
use crate::modules::auth::model::Role;
use crate::services::metrics;

/// Best-effort side channel for security-relevant events. Entries go through
/// a bounded queue to a background writer; a full queue drops the entry,
/// bumps a counter and warns, and never blocks or fails the request path.
#[derive(Clone)]
pub struct AuditLogger {
    tx: mpsc::Sender<AuditLogEntry>,
}

impl AuditLogger {
    pub fn spawn(repo: Arc<dyn AuditLogRepository>, capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<AuditLogEntry>(capacity);

        tokio::spawn(async move {
            while let Some(entry) = rx.recv().await {
                if let Err(e) = repo.append(&entry).await {
                    tracing::error!(action = %entry.action, "audit log write failed: {e}");
                }
            }
        });

        Self { tx }
    }

    pub fn log(&self, entry: AuditLogEntry) {
        if self.tx.try_send(entry).is_err() {
            metrics::AUDIT_DROPPED_TOTAL.inc();
            tracing::warn!("audit queue full, entry dropped");
        }
    }

    /// Convenience wrapper building the entry in place.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &self,
        actor_id: Option<&str>,
        actor_role: Option<Role>,
        action: &str,
        entity_type: &str,
        entity_id: Option<&str>,
        outcome: AuditOutcome,
        metadata: serde_json::Value,
    ) {
        self.log(AuditLogEntry::new(
            actor_id.map(str::to_string),
            actor_role,
            action.to_string(),
            entity_type.to_string(),
            entity_id.map(str::to_string),
            outcome,
            metadata,
        ));
    }
}
