use serde::{Deserialize, Serialize};

use super::model::AuditLogEntry;

#[derive(Debug, Deserialize)]
pub struct AuditListQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    100
}

#[derive(Debug, Serialize)]
pub struct AuditListResponse {
    pub entries: Vec<AuditLogEntry>,
    pub total: usize,
}
