use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;

use campus_api::config::Config;
use campus_api::demo::demo_state;
use campus_api::modules::auth::interface::UserRepository as _;
use campus_api::modules::classes::interface::ClassRepository as _;
use campus_api::{create_app, AppState};

// Allow dead_code for utilities used by other test files
#[allow(dead_code)]
pub struct TestContext {
    pub server: TestServer,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestContext {
    /// Fresh in-memory portal with the seeded demo roster. Every context
    /// gets its own state, so tests never interfere through shared
    /// repositories or rate limiters.
    pub async fn new() -> Self {
        let state = Arc::new(
            demo_state(Config::for_tests())
                .await
                .expect("Failed to seed demo state"),
        );
        let server = TestServer::builder()
            .save_cookies()
            .build(create_app(state.clone()))
            .expect("Failed to create test server");

        Self { server, state }
    }

    /// Log in and return the access token, using a unique client IP so
    /// unrelated tests never trip the login rate limiter.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .server
            .post("/auth/login")
            .add_header("X-Forwarded-For", unique_ip())
            .json(&json!({"email": email, "password": password}))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        body["access_token"]
            .as_str()
            .expect("access token in login response")
            .to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login("admin@campus.test", "Admin@12345").await
    }

    pub async fn teacher_token(&self) -> String {
        self.login("teacher@campus.test", "Teacher@12345").await
    }

    pub async fn student_token(&self) -> String {
        self.login("student@campus.test", "Student@12345").await
    }

    pub async fn parent_token(&self) -> String {
        self.login("parent@campus.test", "Parent@12345").await
    }

    /// Id of a seeded demo account.
    pub async fn user_id(&self, email: &str) -> String {
        self.state
            .users
            .find_by_email(email)
            .await
            .expect("user lookup")
            .expect("seeded user exists")
            .id
    }

    /// The seeded demo class.
    pub async fn demo_class_id(&self) -> String {
        self.state.classes.list().await.expect("class listing")[0]
            .id
            .clone()
    }
}

/// Distinct X-Forwarded-For value per call; the limiter keys on it.
#[allow(dead_code)]
pub fn unique_ip() -> String {
    format!(
        "10.{}.{}.{}",
        rand::random::<u8>(),
        rand::random::<u8>(),
        rand::random::<u8>().max(1)
    )
}

#[allow(dead_code)]
pub fn test_email() -> String {
    format!("test_{}@campus.test", uuid::Uuid::new_v4())
}

#[allow(dead_code)]
pub fn test_password() -> &'static str {
    "TestPassword123!"
}
