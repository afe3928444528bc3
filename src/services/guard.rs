use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;

use crate::modules::auth::model::{Role, User, UserStatus};
use crate::modules::auth::schema::ErrorResponse;
use crate::services::jwt::Claims;
use crate::AppState;

/// Cookie carrying the access token for browser clients.
pub const TOKEN_COOKIE: &str = "token";
/// Cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Authenticated identity as loaded from the store at time of use. Safe to
/// hand to handlers; never contains the password hash.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub status: UserStatus,
    pub two_factor_enabled: bool,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            status: user.status,
            two_factor_enabled: user.two_factor_enabled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    /// No token was presented at all.
    #[error("Authentication required")]
    MissingToken,

    /// A token was presented but failed verification, or its subject no
    /// longer exists, or it predates a credential-invalidating change.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Account suspended")]
    Suspended,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Internal error")]
    Internal,
}

impl GuardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingToken | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Suspended | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Suspended => "ACCOUNT_SUSPENDED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal => "INTERNAL",
        }
    }
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(ErrorResponse::with_message(self.code(), self.to_string())),
        )
            .into_response()
    }
}

/// The core authorization decision, independent of any HTTP types: given the
/// authenticated principal (or none) and the endpoint's role allow-list,
/// decide whether the request proceeds. Ownership checks (a teacher touching
/// only their own class) remain the endpoint's responsibility.
pub fn authorize<'a>(
    principal: Option<&'a Principal>,
    allowed: &[Role],
) -> Result<&'a Principal, GuardError> {
    let principal = principal.ok_or(GuardError::MissingToken)?;
    if principal.status == UserStatus::Suspended {
        return Err(GuardError::Suspended);
    }
    if !allowed.contains(&principal.role) {
        return Err(GuardError::Forbidden);
    }
    Ok(principal)
}

/// Verified session extracted from the request: token checked, user
/// re-loaded, status and staleness enforced. Role checks still happen per
/// endpoint via [`AuthSession::require_role`].
pub struct AuthSession {
    pub principal: Principal,
    pub claims: Claims,
}

impl AuthSession {
    pub fn require_role(&self, allowed: &[Role]) -> Result<&Principal, GuardError> {
        authorize(Some(&self.principal), allowed)
    }
}

fn bearer_or_cookie(parts: &Parts) -> Option<String> {
    if let Some(token) = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
    {
        return Some(token.to_string());
    }
    CookieJar::from_headers(&parts.headers)
        .get(TOKEN_COOKIE)
        .map(|c| c.value().to_string())
}

impl FromRequestParts<Arc<AppState>> for AuthSession {
    type Rejection = GuardError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_or_cookie(parts).ok_or(GuardError::MissingToken)?;

        let claims = state
            .tokens
            .verify_access(&token)
            .map_err(|_| GuardError::InvalidToken)?;

        let user = state
            .users
            .find_by_id(&claims.sub)
            .await
            .map_err(|e| {
                tracing::error!("user lookup during auth failed: {e}");
                GuardError::Internal
            })?
            .ok_or(GuardError::InvalidToken)?;

        if user.status == UserStatus::Suspended {
            return Err(GuardError::Suspended);
        }

        // Stale-session fence: a password change or suspension bumps
        // updated_at, which invalidates tokens issued before it.
        if user.updated_at.timestamp() > claims.iat + state.config.clock_skew_secs {
            return Err(GuardError::InvalidToken);
        }

        Ok(Self {
            principal: Principal::from(&user),
            claims,
        })
    }
}
