use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::modules::audit::model::AuditOutcome;
use crate::services::guard::{AuthSession, REFRESH_COOKIE, TOKEN_COOKIE};
use crate::services::jwt::TokenPair;
use crate::services::rate_limit::client_ip;
use crate::services::{hashing, metrics, totp};
use crate::AppState;

use super::interface::AuthError;
use super::model::{BackupCode, PasswordReset, RefreshToken, User, UserStatus};
use super::schema::{
    Confirm2faRequest, Confirm2faResponse, Disable2faRequest, Disable2faResponse,
    Enable2faResponse, ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest,
    LoginRequires2faResponse, LoginResponse, LogoutResponse, RefreshTokenRequest,
    ResetPasswordRequest, ResetPasswordResponse, UserResponse, Verify2faRequest,
};

fn session_cookie(name: &'static str, value: String, max_age: time::Duration) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

fn session_cookies(jar: CookieJar, pair: &TokenPair) -> CookieJar {
    let mut jar = jar.add(session_cookie(
        TOKEN_COOKIE,
        pair.access_token.clone(),
        time::Duration::seconds(pair.expires_in),
    ));
    if let Some(refresh) = &pair.refresh_token {
        jar = jar.add(session_cookie(
            REFRESH_COOKIE,
            refresh.clone(),
            time::Duration::days(30),
        ));
    }
    jar
}

/// Issue an access/refresh pair and persist the refresh token's digest.
async fn issue_session(
    state: &AppState,
    user: &User,
    remember_me: bool,
    auth_at: i64,
) -> Result<TokenPair, AuthError> {
    let pair = state
        .tokens
        .issue_pair(&user.id, user.role, remember_me, auth_at)
        .map_err(|e| AuthError::Internal(e.to_string()))?;

    if let Some(refresh) = &pair.refresh_token {
        let now = Utc::now();
        state
            .refresh_tokens
            .create(&RefreshToken {
                id: Uuid::new_v4().to_string(),
                user_id: user.id.clone(),
                token_hash: hashing::sha256_hex(refresh),
                expires_at: now + state.tokens.refresh_token_duration(),
                revoked: false,
                created_at: now,
            })
            .await?;
    }

    Ok(pair)
}

fn login_response(user: &User, pair: TokenPair) -> LoginResponse {
    LoginResponse {
        user: UserResponse::from(user),
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        token_type: "Bearer",
        expires_in: pair.expires_in,
    }
}

/// POST /auth/login
///
/// Check order is load-bearing: rate limit before any lookup, suspension
/// before any hash comparison, and absent-user vs wrong-password both
/// collapse into the same 401.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<Response, AuthError> {
    let ip = client_ip(&headers);
    if !state.login_limiter.check(ip, "login") {
        metrics::RATE_LIMITED_TOTAL.with_label_values(&["login"]).inc();
        state.audit.record(
            None,
            None,
            "auth.login",
            "user",
            None,
            AuditOutcome::Denied,
            json!({"ip": ip.to_string(), "reason": "rate_limited"}),
        );
        return Err(AuthError::RateLimited);
    }

    let Some(user) = state.users.find_by_email(&req.email).await? else {
        metrics::LOGIN_ATTEMPTS_TOTAL.with_label_values(&["failure"]).inc();
        state.audit.record(
            None,
            None,
            "auth.login",
            "user",
            None,
            AuditOutcome::Failure,
            json!({"ip": ip.to_string(), "reason": "unknown_email"}),
        );
        return Err(AuthError::InvalidCredentials);
    };

    if user.status == UserStatus::Suspended {
        metrics::LOGIN_ATTEMPTS_TOTAL.with_label_values(&["suspended"]).inc();
        state.audit.record(
            Some(&user.id),
            Some(user.role),
            "auth.login",
            "user",
            Some(&user.id),
            AuditOutcome::Denied,
            json!({"ip": ip.to_string(), "reason": "suspended"}),
        );
        return Err(AuthError::AccountSuspended);
    }

    let valid = hashing::verify_password(&req.password, &user.password_hash)
        .map_err(|e| AuthError::Internal(e.to_string()))?;
    if !valid {
        metrics::LOGIN_ATTEMPTS_TOTAL.with_label_values(&["failure"]).inc();
        state.audit.record(
            Some(&user.id),
            Some(user.role),
            "auth.login",
            "user",
            Some(&user.id),
            AuditOutcome::Failure,
            json!({"ip": ip.to_string(), "reason": "bad_password"}),
        );
        return Err(AuthError::InvalidCredentials);
    }

    if user.two_factor_enabled {
        let temp_token = state.challenges.issue(&user.id).await;
        state.audit.record(
            Some(&user.id),
            Some(user.role),
            "auth.login.2fa_challenge",
            "user",
            Some(&user.id),
            AuditOutcome::Success,
            json!({"ip": ip.to_string()}),
        );
        return Ok(Json(LoginRequires2faResponse {
            requires_2fa: true,
            temp_token,
        })
        .into_response());
    }

    let pair = issue_session(&state, &user, req.remember_me, Utc::now().timestamp()).await?;
    metrics::LOGIN_ATTEMPTS_TOTAL.with_label_values(&["success"]).inc();
    state.audit.record(
        Some(&user.id),
        Some(user.role),
        "auth.login",
        "user",
        Some(&user.id),
        AuditOutcome::Success,
        json!({"ip": ip.to_string()}),
    );

    let jar = session_cookies(jar, &pair);
    Ok((jar, Json(login_response(&user, pair))).into_response())
}

/// POST /auth/verify-2fa
///
/// Completes a pending challenge with a TOTP code or an unused recovery
/// code. The challenge is consumed only on success, so a mistyped code does
/// not force a fresh credential login; every failure is the same 401.
pub async fn verify_2fa(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(req): Json<Verify2faRequest>,
) -> Result<Response, AuthError> {
    let ip = client_ip(&headers);
    if !state.login_limiter.check(ip, "verify-2fa") {
        metrics::RATE_LIMITED_TOTAL.with_label_values(&["verify-2fa"]).inc();
        state.audit.record(
            None,
            None,
            "auth.2fa.verify",
            "user",
            None,
            AuditOutcome::Denied,
            json!({"ip": ip.to_string(), "reason": "rate_limited"}),
        );
        return Err(AuthError::RateLimited);
    }

    let Some(user_id) = state.challenges.peek(&req.temp_token).await else {
        metrics::LOGIN_ATTEMPTS_TOTAL.with_label_values(&["failure"]).inc();
        state.audit.record(
            None,
            None,
            "auth.2fa.verify",
            "user",
            None,
            AuditOutcome::Failure,
            json!({"ip": ip.to_string(), "reason": "unknown_challenge"}),
        );
        return Err(AuthError::TwoFactorFailed);
    };

    let user = state
        .users
        .find_by_id(&user_id)
        .await?
        .ok_or(AuthError::TwoFactorFailed)?;
    if user.status == UserStatus::Suspended {
        return Err(AuthError::AccountSuspended);
    }
    let secret = user
        .two_factor_secret
        .as_deref()
        .ok_or(AuthError::TwoFactorFailed)?;

    let mut valid = totp::verify_code(secret, &req.code).unwrap_or(false);
    if !valid {
        // Fall back to single-use recovery codes.
        let hash = totp::hash_backup_code(&req.code);
        let codes = state.backup_codes.find_unused_by_user(&user.id).await?;
        if let Some(code) = codes.iter().find(|c| c.code_hash == hash) {
            state.backup_codes.mark_used(&code.id).await?;
            valid = true;
        }
    }

    if !valid {
        metrics::LOGIN_ATTEMPTS_TOTAL.with_label_values(&["failure"]).inc();
        state.audit.record(
            Some(&user.id),
            Some(user.role),
            "auth.2fa.verify",
            "user",
            Some(&user.id),
            AuditOutcome::Failure,
            json!({"ip": ip.to_string(), "reason": "bad_code"}),
        );
        return Err(AuthError::TwoFactorFailed);
    }

    // Winning the consume gates issuance; a concurrent verification of the
    // same challenge loses here even after passing the code check.
    state
        .challenges
        .consume(&req.temp_token)
        .await
        .ok_or(AuthError::TwoFactorFailed)?;

    let pair = issue_session(&state, &user, req.remember_me, Utc::now().timestamp()).await?;
    metrics::LOGIN_ATTEMPTS_TOTAL.with_label_values(&["success"]).inc();
    state.audit.record(
        Some(&user.id),
        Some(user.role),
        "auth.2fa.verify",
        "user",
        Some(&user.id),
        AuditOutcome::Success,
        json!({"ip": ip.to_string()}),
    );

    let jar = session_cookies(jar, &pair);
    Ok((jar, Json(login_response(&user, pair))).into_response())
}

/// POST /auth/refresh
///
/// Rotates the refresh token. `auth_at` is carried from the old token, so
/// rotation never extends an admin session past its absolute cap.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    body: Option<Json<RefreshTokenRequest>>,
) -> Result<Response, AuthError> {
    let token = body
        .and_then(|Json(b)| b.refresh_token)
        .or_else(|| jar.get(REFRESH_COOKIE).map(|c| c.value().to_string()))
        .ok_or(AuthError::InvalidToken)?;

    let claims = state
        .tokens
        .verify_refresh(&token)
        .map_err(|_| AuthError::InvalidToken)?;

    let hash = hashing::sha256_hex(&token);
    let stored = state
        .refresh_tokens
        .find_by_token_hash(&hash)
        .await?
        .ok_or(AuthError::InvalidToken)?;
    if stored.revoked || stored.expires_at <= Utc::now() {
        return Err(AuthError::InvalidToken);
    }

    let user = state
        .users
        .find_by_id(&claims.sub)
        .await?
        .ok_or(AuthError::InvalidToken)?;
    if user.status == UserStatus::Suspended {
        return Err(AuthError::AccountSuspended);
    }
    if user.updated_at.timestamp() > claims.iat + state.config.clock_skew_secs {
        return Err(AuthError::InvalidToken);
    }

    state.refresh_tokens.revoke(&hash).await?;
    let pair = issue_session(&state, &user, true, claims.auth_at).await?;
    state.audit.record(
        Some(&user.id),
        Some(user.role),
        "auth.refresh",
        "user",
        Some(&user.id),
        AuditOutcome::Success,
        serde_json::Value::Null,
    );

    let jar = session_cookies(jar, &pair);
    Ok((jar, Json(login_response(&user, pair))).into_response())
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    jar: CookieJar,
) -> Result<(CookieJar, Json<LogoutResponse>), AuthError> {
    if let Some(cookie) = jar.get(REFRESH_COOKIE) {
        state
            .refresh_tokens
            .revoke(&hashing::sha256_hex(cookie.value()))
            .await?;
    }

    state.audit.record(
        Some(&session.principal.id),
        Some(session.principal.role),
        "auth.logout",
        "user",
        Some(&session.principal.id),
        AuditOutcome::Success,
        serde_json::Value::Null,
    );

    let jar = jar
        .remove(Cookie::build((TOKEN_COOKIE, "")).path("/"))
        .remove(Cookie::build((REFRESH_COOKIE, "")).path("/"));
    Ok((jar, Json(LogoutResponse { message: "Logged out" })))
}

/// GET /auth/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
) -> Result<Json<UserResponse>, AuthError> {
    let user = state
        .users
        .find_by_id(&session.principal.id)
        .await?
        .ok_or(AuthError::UserNotFound)?;
    Ok(Json(UserResponse::from(&user)))
}

/// POST /auth/enable-2fa: generate a pending secret; the flag only flips
/// after the owner proves they can produce a code for it.
pub async fn enable_2fa(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
) -> Result<Json<Enable2faResponse>, AuthError> {
    let user = state
        .users
        .find_by_id(&session.principal.id)
        .await?
        .ok_or(AuthError::UserNotFound)?;
    if user.two_factor_enabled {
        return Err(AuthError::TwoFactorAlreadyEnabled);
    }

    let secret = totp::generate_secret();
    state
        .users
        .set_two_factor(&user.id, false, Some(&secret))
        .await?;
    let otpauth_url = totp::otpauth_url(&secret, &user.email)
        .map_err(|e| AuthError::Internal(e.to_string()))?;

    state.audit.record(
        Some(&user.id),
        Some(user.role),
        "auth.2fa.setup",
        "user",
        Some(&user.id),
        AuditOutcome::Success,
        serde_json::Value::Null,
    );

    Ok(Json(Enable2faResponse { secret, otpauth_url }))
}

/// POST /auth/confirm-2fa
pub async fn confirm_2fa(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Json(req): Json<Confirm2faRequest>,
) -> Result<Json<Confirm2faResponse>, AuthError> {
    let user = state
        .users
        .find_by_id(&session.principal.id)
        .await?
        .ok_or(AuthError::UserNotFound)?;
    if user.two_factor_enabled {
        return Err(AuthError::TwoFactorAlreadyEnabled);
    }
    let secret = user
        .two_factor_secret
        .clone()
        .ok_or(AuthError::TwoFactorSetupMissing)?;

    if !totp::verify_code(&secret, &req.code).unwrap_or(false) {
        state.audit.record(
            Some(&user.id),
            Some(user.role),
            "auth.2fa.enable",
            "user",
            Some(&user.id),
            AuditOutcome::Failure,
            serde_json::Value::Null,
        );
        return Err(AuthError::InvalidTwoFactorCode);
    }

    let recovery_codes = totp::generate_backup_codes();
    let now = Utc::now();
    let rows: Vec<BackupCode> = recovery_codes
        .iter()
        .map(|code| BackupCode {
            id: Uuid::new_v4().to_string(),
            user_id: user.id.clone(),
            code_hash: totp::hash_backup_code(code),
            used: false,
            created_at: now,
        })
        .collect();

    state
        .users
        .set_two_factor(&user.id, true, Some(&secret))
        .await?;
    state.backup_codes.replace_for_user(&user.id, &rows).await?;

    state.audit.record(
        Some(&user.id),
        Some(user.role),
        "auth.2fa.enable",
        "user",
        Some(&user.id),
        AuditOutcome::Success,
        serde_json::Value::Null,
    );

    Ok(Json(Confirm2faResponse {
        message: "Two-factor authentication enabled",
        recovery_codes,
    }))
}

/// POST /auth/disable-2fa
pub async fn disable_2fa(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Json(req): Json<Disable2faRequest>,
) -> Result<Json<Disable2faResponse>, AuthError> {
    let user = state
        .users
        .find_by_id(&session.principal.id)
        .await?
        .ok_or(AuthError::UserNotFound)?;
    if !user.two_factor_enabled {
        return Err(AuthError::TwoFactorNotEnabled);
    }
    let secret = user
        .two_factor_secret
        .as_deref()
        .ok_or(AuthError::TwoFactorNotEnabled)?;

    if !totp::verify_code(secret, &req.code).unwrap_or(false) {
        return Err(AuthError::InvalidTwoFactorCode);
    }

    state.users.set_two_factor(&user.id, false, None).await?;
    state.backup_codes.delete_for_user(&user.id).await?;

    state.audit.record(
        Some(&user.id),
        Some(user.role),
        "auth.2fa.disable",
        "user",
        Some(&user.id),
        AuditOutcome::Success,
        serde_json::Value::Null,
    );

    Ok(Json(Disable2faResponse {
        message: "Two-factor authentication disabled",
    }))
}

/// POST /auth/forgot-password: always 200, never confirms account
/// existence. Demo mode echoes the token in place of email delivery.
pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<ForgotPasswordResponse>, AuthError> {
    req.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let ip = client_ip(&headers);
    if !state.login_limiter.check(ip, "forgot-password") {
        metrics::RATE_LIMITED_TOTAL
            .with_label_values(&["forgot-password"])
            .inc();
        state.audit.record(
            None,
            None,
            "auth.password_reset.request",
            "user",
            None,
            AuditOutcome::Denied,
            json!({"ip": ip.to_string(), "reason": "rate_limited"}),
        );
        return Err(AuthError::RateLimited);
    }

    let mut reset_token = None;
    if let Some(user) = state.users.find_by_email(&req.email).await? {
        if user.status == UserStatus::Active {
            let now = Utc::now();
            let token = Uuid::new_v4().to_string();
            state
                .password_resets
                .create(&PasswordReset {
                    id: Uuid::new_v4().to_string(),
                    user_id: user.id.clone(),
                    token: token.clone(),
                    expires_at: now + Duration::hours(1),
                    used: false,
                    created_at: now,
                })
                .await?;
            state.audit.record(
                Some(&user.id),
                Some(user.role),
                "auth.password_reset.request",
                "user",
                Some(&user.id),
                AuditOutcome::Success,
                json!({"ip": ip.to_string()}),
            );
            if state.config.demo_mode {
                reset_token = Some(token);
            }
        }
    }

    Ok(Json(ForgotPasswordResponse {
        message: "If the account exists, a reset link has been sent",
        reset_token,
    }))
}

/// POST /auth/reset-password
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<ResetPasswordResponse>, AuthError> {
    hashing::validate_password_strength(&req.new_password).map_err(AuthError::WeakPassword)?;

    let reset = state
        .password_resets
        .find_by_token(&req.token)
        .await?
        .ok_or(AuthError::InvalidResetToken)?;
    if reset.used || reset.expires_at <= Utc::now() {
        return Err(AuthError::InvalidResetToken);
    }

    let user = state
        .users
        .find_by_id(&reset.user_id)
        .await?
        .ok_or(AuthError::InvalidResetToken)?;

    let password_hash = hashing::hash_password(&req.new_password)
        .map_err(|e| AuthError::Internal(e.to_string()))?;
    state.users.update_password(&user.id, &password_hash).await?;
    state.password_resets.mark_used(&reset.id).await?;
    state.refresh_tokens.revoke_all_for_user(&user.id).await?;

    state.audit.record(
        Some(&user.id),
        Some(user.role),
        "auth.password_reset.complete",
        "user",
        Some(&user.id),
        AuditOutcome::Success,
        serde_json::Value::Null,
    );

    Ok(Json(ResetPasswordResponse {
        message: "Password updated",
    }))
}
