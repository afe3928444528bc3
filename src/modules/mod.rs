pub mod analytics;
pub mod attendance;
pub mod audit;
pub mod auth;
pub mod classes;
pub mod grades;
pub mod metrics;
pub mod users;
