use async_trait::async_trait;

use super::model::{BackupCode, PasswordReset, RefreshToken, User, UserStatus};

// =============================================================================
// REPOSITORY TRAITS
// =============================================================================

pub type Result<T> = std::result::Result<T, AuthError>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<()>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn list(&self) -> Result<Vec<User>>;
    /// Re-hash on password change; bumps `updated_at` so older tokens go
    /// stale.
    async fn update_password(&self, user_id: &str, password_hash: &str) -> Result<()>;
    /// Suspend/reactivate; bumps `updated_at`.
    async fn set_status(&self, user_id: &str, status: UserStatus) -> Result<()>;
    async fn set_two_factor(&self, user_id: &str, enabled: bool, secret: Option<&str>)
        -> Result<()>;
    async fn delete(&self, user_id: &str) -> Result<()>;
}

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    async fn create(&self, token: &RefreshToken) -> Result<()>;
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>>;
    async fn revoke(&self, token_hash: &str) -> Result<()>;
    async fn revoke_all_for_user(&self, user_id: &str) -> Result<()>;
}

#[async_trait]
pub trait PasswordResetRepository: Send + Sync {
    async fn create(&self, reset: &PasswordReset) -> Result<()>;
    async fn find_by_token(&self, token: &str) -> Result<Option<PasswordReset>>;
    async fn mark_used(&self, id: &str) -> Result<()>;
    async fn delete_for_user(&self, user_id: &str) -> Result<()>;
}

#[async_trait]
pub trait BackupCodeRepository: Send + Sync {
    /// Replace the full recovery-code set, as happens on 2FA activation.
    async fn replace_for_user(&self, user_id: &str, codes: &[BackupCode]) -> Result<()>;
    async fn find_unused_by_user(&self, user_id: &str) -> Result<Vec<BackupCode>>;
    async fn mark_used(&self, id: &str) -> Result<()>;
    async fn delete_for_user(&self, user_id: &str) -> Result<()>;
}

// =============================================================================
// ERROR TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account suspended")]
    AccountSuspended,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Invalid token or code")]
    TwoFactorFailed,

    #[error("Invalid 2FA code")]
    InvalidTwoFactorCode,

    #[error("2FA setup not initiated")]
    TwoFactorSetupMissing,

    #[error("2FA already enabled")]
    TwoFactorAlreadyEnabled,

    #[error("2FA not enabled")]
    TwoFactorNotEnabled,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Resource not found")]
    NotFound,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Too many requests")]
    RateLimited,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<crate::services::guard::GuardError> for AuthError {
    fn from(e: crate::services::guard::GuardError) -> Self {
        use crate::services::guard::GuardError;
        match e {
            GuardError::MissingToken | GuardError::InvalidToken => Self::InvalidToken,
            GuardError::Suspended => Self::AccountSuspended,
            GuardError::Forbidden => Self::Forbidden,
            GuardError::Internal => Self::Internal("guard failure".to_string()),
        }
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(e.to_string())
    }
}

impl AuthError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Self::InvalidCredentials | Self::TwoFactorFailed | Self::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::AccountSuspended | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::InvalidTwoFactorCode
            | Self::TwoFactorSetupMissing
            | Self::TwoFactorAlreadyEnabled
            | Self::TwoFactorNotEnabled
            | Self::InvalidResetToken
            | Self::WeakPassword(_)
            | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::EmailAlreadyExists => StatusCode::CONFLICT,
            Self::UserNotFound | Self::NotFound => StatusCode::NOT_FOUND,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the `{error}` body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AccountSuspended => "ACCOUNT_SUSPENDED",
            Self::Forbidden => "FORBIDDEN",
            Self::TwoFactorFailed => "TWO_FACTOR_FAILED",
            Self::InvalidTwoFactorCode => "INVALID_2FA_CODE",
            Self::TwoFactorSetupMissing => "TWO_FACTOR_SETUP_MISSING",
            Self::TwoFactorAlreadyEnabled => "TWO_FACTOR_ALREADY_ENABLED",
            Self::TwoFactorNotEnabled => "TWO_FACTOR_NOT_ENABLED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidResetToken => "INVALID_RESET_TOKEN",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UserNotFound | Self::NotFound => "NOT_FOUND",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::Validation(_) => "VALIDATION",
            Self::RateLimited => "TOO_MANY_REQUESTS",
            Self::Database(_) | Self::Internal(_) => "INTERNAL",
        }
    }
}

impl axum::response::IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        use super::schema::ErrorResponse;

        let status = self.status_code();
        // Internal detail stays server-side.
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => {
                tracing::error!("internal error: {self}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, axum::Json(ErrorResponse::with_message(self.code(), message))).into_response()
    }
}
