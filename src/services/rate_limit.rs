use std::net::IpAddr;
use std::num::NonZeroU32;
use std::time::Duration;

use axum::http::HeaderMap;
use governor::{clock::DefaultClock, state::keyed::DefaultKeyedStateStore, Quota, RateLimiter};

type Key = (IpAddr, &'static str);

/// Per-(client IP, action) limiter for login-capable endpoints. Consulted
/// before any credential work so a limited client never triggers a password
/// hash comparison.
pub struct ActionRateLimiter {
    limiter: RateLimiter<Key, DefaultKeyedStateStore<Key>, DefaultClock>,
    attempts: u32,
    window: Duration,
}

impl ActionRateLimiter {
    /// Allow `attempts` requests per `window`, replenishing evenly across
    /// the window.
    pub fn new(attempts: u32, window: Duration) -> Self {
        let attempts = attempts.max(1);
        let burst = NonZeroU32::new(attempts).expect("non-zero attempts");
        let quota = Quota::with_period(window / attempts)
            .expect("non-zero window")
            .allow_burst(burst);
        Self {
            limiter: RateLimiter::keyed(quota),
            attempts,
            window,
        }
    }

    /// `true` when the request may proceed.
    pub fn check(&self, ip: IpAddr, action: &'static str) -> bool {
        self.limiter.check_key(&(ip, action)).is_ok()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

/// Client IP for rate-limit keying: first hop of `X-Forwarded-For` when the
/// app sits behind a proxy, loopback otherwise.
pub fn client_ip(headers: &HeaderMap) -> IpAddr {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(IpAddr::from([127, 0, 0, 1]))
}
