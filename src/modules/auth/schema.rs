use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::{Role, User, UserStatus};

// =============================================================================
// LOGIN
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub token_type: &'static str,
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct LoginRequires2faResponse {
    pub requires_2fa: bool,
    pub temp_token: String,
}

// =============================================================================
// TWO-FACTOR LOGIN COMPLETION
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct Verify2faRequest {
    pub temp_token: String,
    pub code: String,
    #[serde(default)]
    pub remember_me: bool,
}

// =============================================================================
// REFRESH / LOGOUT
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct RefreshTokenRequest {
    /// Falls back to the `refreshToken` cookie when absent.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: &'static str,
}

// =============================================================================
// CURRENT USER
// =============================================================================

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub status: UserStatus,
    pub two_factor_enabled: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            status: user.status,
            two_factor_enabled: user.two_factor_enabled,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// =============================================================================
// TWO-FACTOR ENROLLMENT
// =============================================================================

#[derive(Debug, Serialize)]
pub struct Enable2faResponse {
    pub secret: String,
    pub otpauth_url: String,
}

#[derive(Debug, Deserialize)]
pub struct Confirm2faRequest {
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct Confirm2faResponse {
    pub message: &'static str,
    /// Shown exactly once; only hashes are stored.
    pub recovery_codes: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Disable2faRequest {
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct Disable2faResponse {
    pub message: &'static str,
}

// =============================================================================
// PASSWORD RESET
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct ForgotPasswordResponse {
    pub message: &'static str,
    /// Demo mode only: the token that would otherwise be emailed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct ResetPasswordResponse {
    pub message: &'static str,
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    pub fn with_message(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: Some(message.into()),
        }
    }
}
