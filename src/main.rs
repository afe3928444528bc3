use std::sync::Arc;

use campus_api::config::{init_db, Config};
use campus_api::modules::attendance::crud::MySqlAttendanceRepository;
use campus_api::modules::audit::crud::MySqlAuditLogRepository;
use campus_api::modules::auth::crud::{
    MySqlBackupCodeRepository, MySqlPasswordResetRepository, MySqlRefreshTokenRepository,
    MySqlUserRepository,
};
use campus_api::modules::classes::crud::MySqlClassRepository;
use campus_api::modules::grades::crud::MySqlGradeRepository;
use campus_api::{create_app, demo, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campus_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load environment configuration");
    let bind_addr = config.bind_addr.clone();

    let state = if config.demo_mode {
        tracing::warn!("DEMO_MODE enabled: in-memory storage, seeded accounts");
        demo::demo_state(config)
            .await
            .expect("Failed to seed demo state")
    } else {
        let database_url = config
            .database_url
            .clone()
            .expect("DATABASE_URL must be set outside demo mode");
        let db = init_db(&database_url)
            .await
            .expect("Failed to connect to MySQL");
        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .expect("Failed to run migrations");
        tracing::info!("Connected to MySQL");

        AppState::new(
            Arc::new(MySqlUserRepository::new(db.clone())),
            Arc::new(MySqlRefreshTokenRepository::new(db.clone())),
            Arc::new(MySqlPasswordResetRepository::new(db.clone())),
            Arc::new(MySqlBackupCodeRepository::new(db.clone())),
            Arc::new(MySqlClassRepository::new(db.clone())),
            Arc::new(MySqlGradeRepository::new(db.clone())),
            Arc::new(MySqlAttendanceRepository::new(db.clone())),
            Arc::new(MySqlAuditLogRepository::new(db)),
            config,
        )
    };

    let app = create_app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind");
    tracing::info!("Server running on http://{bind_addr}");
    axum::serve(listener, app).await.expect("Server error");
}
