pub mod aggregation;
pub mod audit;
pub mod challenge;
pub mod guard;
pub mod hashing;
pub mod jwt;
pub mod metrics;
pub mod rate_limit;
pub mod security;
pub mod totp;
