use std::env;
use std::time::Duration;

/// Environment configuration
/// Loads and validates environment variables
#[derive(Clone)]
pub struct Config {
    /// Absent only in demo mode.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub demo_mode: bool,
    pub bind_addr: String,
    pub rate_limit_attempts: u32,
    pub rate_limit_window: Duration,
    /// Grace applied to the stale-session fence. Tests run with 0.
    pub clock_skew_secs: i64,
    pub audit_queue_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let demo_mode = env::var("DEMO_MODE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => Some(url),
            Err(_) if demo_mode => None,
            Err(_) => return Err("DATABASE_URL must be set (or DEMO_MODE=true)".to_string()),
        };

        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| "JWT_SECRET must be set".to_string())?;

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let rate_limit_attempts = env::var("RATE_LIMIT_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);
        let rate_limit_window = env::var("RATE_LIMIT_WINDOW_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(60));

        let clock_skew_secs = env::var("CLOCK_SKEW_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let audit_queue_capacity = env::var("AUDIT_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1024);

        Ok(Self {
            database_url,
            jwt_secret,
            demo_mode,
            bind_addr,
            rate_limit_attempts,
            rate_limit_window,
            clock_skew_secs,
            audit_queue_capacity,
        })
    }

    /// Fixed settings for the in-memory test harness: no skew grace so
    /// staleness is observable at second granularity, and a small limiter
    /// window so rate-limit tests replenish quickly.
    pub fn for_tests() -> Self {
        Self {
            database_url: None,
            jwt_secret: "test-secret-key-for-testing-only".to_string(),
            demo_mode: true,
            bind_addr: "127.0.0.1:0".to_string(),
            rate_limit_attempts: 3,
            rate_limit_window: Duration::from_secs(60),
            clock_skew_secs: 0,
            audit_queue_capacity: 64,
        }
    }
}
