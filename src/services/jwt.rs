use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::auth::model::Role;

/// Clock-skew grace when validating `exp`/`iat`.
pub const LEEWAY_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
    /// Instant of the original credential login, carried unchanged through
    /// refresh rotation so absolute session age can be bounded.
    pub auth_at: i64,
    pub typ: TokenKind,
    /// Unique id for refresh-token revocation; absent on access tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,

    #[error("Token signing failed: {0}")]
    Signing(String),
}

#[derive(Debug)]
pub struct TokenPair {
    pub access_token: String,
    /// Only issued when the client asked to be remembered.
    pub refresh_token: Option<String>,
    pub expires_in: i64,
}

pub struct TokenService {
    secret: String,
    access_token_duration: Duration,
    refresh_token_duration: Duration,
    /// Hard cap on the absolute lifetime of an ADMIN session. Bounds the
    /// blast radius of a leaked elevated-privilege token: once `auth_at` is
    /// older than this, the token is rejected even if `exp` still passes.
    admin_session_cap: Duration,
}

impl TokenService {
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            access_token_duration: Duration::minutes(15),
            refresh_token_duration: Duration::days(30),
            admin_session_cap: Duration::hours(8),
        }
    }

    /// Issue an access token and, when `remember_me`, a refresh token.
    ///
    /// `auth_at` is the Unix timestamp of the original credential login; a
    /// fresh login passes the current instant, the refresh endpoint carries
    /// the value from the old token forward.
    pub fn issue_pair(
        &self,
        user_id: &str,
        role: Role,
        remember_me: bool,
        auth_at: i64,
    ) -> Result<TokenPair, TokenError> {
        let now = Utc::now();

        let access_claims = Claims {
            sub: user_id.to_string(),
            role,
            exp: (now + self.access_token_duration).timestamp(),
            iat: now.timestamp(),
            auth_at,
            typ: TokenKind::Access,
            jti: None,
        };
        let access_token = self.sign(&access_claims)?;

        let refresh_token = if remember_me {
            let refresh_claims = Claims {
                sub: user_id.to_string(),
                role,
                exp: (now + self.refresh_token_duration).timestamp(),
                iat: now.timestamp(),
                auth_at,
                typ: TokenKind::Refresh,
                jti: Some(Uuid::new_v4().to_string()),
            };
            Some(self.sign(&refresh_claims)?)
        } else {
            None
        };

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.access_token_duration.num_seconds(),
        })
    }

    pub fn verify_access(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify(token, TokenKind::Access)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.verify(token, TokenKind::Refresh)?;
        // Refresh tokens must carry a jti for revocation tracking.
        if claims.jti.is_none() {
            return Err(TokenError::Invalid);
        }
        Ok(claims)
    }

    pub fn access_token_duration_secs(&self) -> i64 {
        self.access_token_duration.num_seconds()
    }

    pub fn refresh_token_duration(&self) -> Duration {
        self.refresh_token_duration
    }

    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = LEEWAY_SECS;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })?;

        let claims = data.claims;
        if claims.typ != expected {
            return Err(TokenError::Invalid);
        }

        // Admin sessions have a hard absolute lifetime regardless of exp.
        if claims.role == Role::Admin
            && Utc::now().timestamp() > claims.auth_at + self.admin_session_cap.num_seconds()
        {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
