use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::auth::model::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum AuditOutcome {
    Success,
    Denied,
    Failure,
}

/// Append-only record of a security-relevant event. `actor_id` is absent
/// for unauthenticated events such as failed logins.
#[derive(Debug, Clone, Serialize)]
pub struct AuditLogEntry {
    pub id: String,
    pub actor_id: Option<String>,
    pub actor_role: Option<Role>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub outcome: AuditOutcome,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    pub fn new(
        actor_id: Option<String>,
        actor_role: Option<Role>,
        action: String,
        entity_type: String,
        entity_id: Option<String>,
        outcome: AuditOutcome,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            actor_id,
            actor_role,
            action,
            entity_type,
            entity_id,
            outcome,
            metadata,
            created_at: Utc::now(),
        }
    }
}
