use async_trait::async_trait;
use sqlx::{MySql, Pool, Row};

use crate::modules::auth::interface::{AuthError, Result};
use crate::modules::auth::model::Role;

use super::interface::AuditLogRepository;
use super::model::{AuditLogEntry, AuditOutcome};

#[derive(Clone)]
pub struct MySqlAuditLogRepository {
    pool: Pool<MySql>,
}

impl MySqlAuditLogRepository {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

fn parse_role(value: Option<String>) -> Option<Role> {
    match value.as_deref() {
        Some("ADMIN") => Some(Role::Admin),
        Some("TEACHER") => Some(Role::Teacher),
        Some("STUDENT") => Some(Role::Student),
        Some("PARENT") => Some(Role::Parent),
        _ => None,
    }
}

fn parse_outcome(value: &str) -> Result<AuditOutcome> {
    match value {
        "SUCCESS" => Ok(AuditOutcome::Success),
        "DENIED" => Ok(AuditOutcome::Denied),
        "FAILURE" => Ok(AuditOutcome::Failure),
        other => Err(AuthError::Database(format!(
            "unknown audit outcome {other}"
        ))),
    }
}

#[async_trait]
impl AuditLogRepository for MySqlAuditLogRepository {
    async fn append(&self, entry: &AuditLogEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_log (id, actor_id, actor_role, action, entity_type, entity_id, outcome, metadata, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.actor_id)
        .bind(entry.actor_role.map(|r| r.as_str()))
        .bind(&entry.action)
        .bind(&entry.entity_type)
        .bind(&entry.entity_id)
        .bind(entry.outcome)
        .bind(entry.metadata.to_string())
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<AuditLogEntry>> {
        let rows = sqlx::query(
            "SELECT * FROM audit_log ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            let metadata: String = row.try_get("metadata")?;
            let outcome: String = row.try_get("outcome")?;
            entries.push(AuditLogEntry {
                id: row.try_get("id")?,
                actor_id: row.try_get("actor_id")?,
                actor_role: parse_role(row.try_get("actor_role")?),
                action: row.try_get("action")?,
                entity_type: row.try_get("entity_type")?,
                entity_id: row.try_get("entity_id")?,
                outcome: parse_outcome(&outcome)?,
                metadata: serde_json::from_str(&metadata)
                    .unwrap_or(serde_json::Value::Null),
                created_at: row.try_get("created_at")?,
            });
        }
        Ok(entries)
    }
}
