use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Pending "primary credentials verified, 2FA outstanding" state, keyed by
/// the temp token handed to the client. Entries expire on the wall clock and
/// are consumed exactly once.
pub struct ChallengeStore {
    inner: RwLock<HashMap<String, Challenge>>,
    ttl: Duration,
}

#[derive(Debug, Clone)]
struct Challenge {
    user_id: String,
    expires_at: DateTime<Utc>,
}

impl ChallengeStore {
    pub fn new() -> Self {
        Self::with_ttl(Duration::minutes(5))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Record a pending challenge and return the temp token for it.
    pub async fn issue(&self, user_id: &str) -> String {
        let token = Uuid::new_v4().to_string();
        let mut map = self.inner.write().await;
        let now = Utc::now();
        map.retain(|_, c| c.expires_at > now);
        map.insert(
            token.clone(),
            Challenge {
                user_id: user_id.to_string(),
                expires_at: now + self.ttl,
            },
        );
        token
    }

    /// Look up the challenge without consuming it. Used while a code is
    /// being checked so a wrong code leaves the challenge standing.
    pub async fn peek(&self, token: &str) -> Option<String> {
        let map = self.inner.read().await;
        let challenge = map.get(token)?;
        if challenge.expires_at <= Utc::now() {
            return None;
        }
        Some(challenge.user_id.clone())
    }

    /// Consume the challenge for `token`, returning the user id it belongs
    /// to. A second call with the same token, or a call after expiry,
    /// returns `None`.
    pub async fn consume(&self, token: &str) -> Option<String> {
        let mut map = self.inner.write().await;
        let challenge = map.remove(token)?;
        if challenge.expires_at <= Utc::now() {
            return None;
        }
        Some(challenge.user_id)
    }
}

impl Default for ChallengeStore {
    fn default() -> Self {
        Self::new()
    }
}
