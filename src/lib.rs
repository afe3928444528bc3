pub mod config;
pub mod demo;
pub mod modules;
pub mod services;

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use config::Config;
use modules::analytics::analytics_routes;
use modules::attendance::attendance_routes;
use modules::attendance::interface::AttendanceRepository;
use modules::audit::audit_routes;
use modules::audit::interface::AuditLogRepository;
use modules::auth::auth_routes;
use modules::auth::interface::{
    BackupCodeRepository, PasswordResetRepository, RefreshTokenRepository, UserRepository,
};
use modules::classes::class_routes;
use modules::classes::interface::ClassRepository;
use modules::grades::grade_routes;
use modules::grades::interface::GradeRepository;
use modules::metrics::metrics_routes;
use modules::users::user_routes;
use services::audit::AuditLogger;
use services::challenge::ChallengeStore;
use services::jwt::TokenService;
use services::rate_limit::ActionRateLimiter;
use services::security::security_headers;

pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub refresh_tokens: Arc<dyn RefreshTokenRepository>,
    pub password_resets: Arc<dyn PasswordResetRepository>,
    pub backup_codes: Arc<dyn BackupCodeRepository>,
    pub classes: Arc<dyn ClassRepository>,
    pub grades: Arc<dyn GradeRepository>,
    pub attendance: Arc<dyn AttendanceRepository>,
    pub audit_log: Arc<dyn AuditLogRepository>,
    pub tokens: TokenService,
    pub challenges: ChallengeStore,
    pub login_limiter: ActionRateLimiter,
    pub audit: AuditLogger,
    pub config: Config,
}

impl AppState {
    /// Wire shared services around an already-chosen repository set.
    pub fn new(
        users: Arc<dyn UserRepository>,
        refresh_tokens: Arc<dyn RefreshTokenRepository>,
        password_resets: Arc<dyn PasswordResetRepository>,
        backup_codes: Arc<dyn BackupCodeRepository>,
        classes: Arc<dyn ClassRepository>,
        grades: Arc<dyn GradeRepository>,
        attendance: Arc<dyn AttendanceRepository>,
        audit_log: Arc<dyn AuditLogRepository>,
        config: Config,
    ) -> Self {
        let tokens = TokenService::new(config.jwt_secret.clone());
        let challenges = ChallengeStore::new();
        let login_limiter =
            ActionRateLimiter::new(config.rate_limit_attempts, config.rate_limit_window);
        let audit = AuditLogger::spawn(audit_log.clone(), config.audit_queue_capacity);

        Self {
            users,
            refresh_tokens,
            password_resets,
            backup_codes,
            classes,
            grades,
            attendance,
            audit_log,
            tokens,
            challenges,
            login_limiter,
            audit,
            config,
        }
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(metrics_routes())
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/classes", class_routes())
        .nest("/grades", grade_routes())
        .nest("/attendance", attendance_routes())
        .nest("/analytics", analytics_routes())
        .nest("/audit", audit_routes())
        .layer(middleware::from_fn(security_headers))
        .layer(RequestBodyLimitLayer::new(1024 * 100)) // 100KB max body
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "Campus Portal API"
}
