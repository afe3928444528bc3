use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    pub static ref LOGIN_ATTEMPTS_TOTAL: IntCounterVec = {
        let counter = IntCounterVec::new(
            Opts::new("campus_login_attempts_total", "Login attempts by outcome"),
            &["outcome"],
        )
        .expect("metric definition");
        REGISTRY
            .register(Box::new(counter.clone()))
            .expect("metric registration");
        counter
    };

    pub static ref RATE_LIMITED_TOTAL: IntCounterVec = {
        let counter = IntCounterVec::new(
            Opts::new("campus_rate_limited_total", "Requests rejected by the rate limiter"),
            &["action"],
        )
        .expect("metric definition");
        REGISTRY
            .register(Box::new(counter.clone()))
            .expect("metric registration");
        counter
    };

    pub static ref AUDIT_DROPPED_TOTAL: IntCounter = {
        let counter = IntCounter::new(
            "campus_audit_dropped_total",
            "Audit entries dropped because the queue was full",
        )
        .expect("metric definition");
        REGISTRY
            .register(Box::new(counter.clone()))
            .expect("metric registration");
        counter
    };
}

/// Render the registry in the Prometheus text exposition format.
pub fn render() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    if encoder.encode(&REGISTRY.gather(), &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
