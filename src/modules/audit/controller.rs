use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::modules::auth::interface::AuthError;
use crate::modules::auth::model::Role;
use crate::services::guard::AuthSession;
use crate::AppState;

use super::schema::{AuditListQuery, AuditListResponse};

const LIST_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_LIMIT: usize = 1000;

/// GET /audit (admin)
pub async fn list_audit_log(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Query(query): Query<AuditListQuery>,
) -> Result<Json<AuditListResponse>, AuthError> {
    session.require_role(&[Role::Admin])?;

    let limit = query.limit.min(MAX_LIMIT);
    let entries = tokio::time::timeout(LIST_TIMEOUT, state.audit_log.list_recent(limit))
        .await
        .map_err(|_| AuthError::Internal("audit listing timed out".to_string()))??;

    let total = entries.len();
    Ok(Json(AuditListResponse { entries, total }))
}
