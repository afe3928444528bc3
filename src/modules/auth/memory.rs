//! In-memory repositories backing demo mode and the test suite. Same
//! semantics as the MySQL implementations, including the `updated_at`
//! bumping rules the stale-session fence depends on.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::interface::{
    AuthError, BackupCodeRepository, PasswordResetRepository, RefreshTokenRepository, Result,
    UserRepository,
};
use super::model::{BackupCode, PasswordReset, RefreshToken, User, UserStatus};

#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyExists);
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update_password(&self, user_id: &str, password_hash: &str) -> Result<()> {
        let mut users = self.users.write().await;
        let user = users.get_mut(user_id).ok_or(AuthError::UserNotFound)?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn set_status(&self, user_id: &str, status: UserStatus) -> Result<()> {
        let mut users = self.users.write().await;
        let user = users.get_mut(user_id).ok_or(AuthError::UserNotFound)?;
        user.status = status;
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn set_two_factor(
        &self,
        user_id: &str,
        enabled: bool,
        secret: Option<&str>,
    ) -> Result<()> {
        let mut users = self.users.write().await;
        let user = users.get_mut(user_id).ok_or(AuthError::UserNotFound)?;
        user.two_factor_enabled = enabled;
        user.two_factor_secret = secret.map(str::to_string);
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<()> {
        self.users.write().await.remove(user_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryRefreshTokenRepository {
    tokens: RwLock<HashMap<String, RefreshToken>>,
}

impl MemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RefreshTokenRepository for MemoryRefreshTokenRepository {
    async fn create(&self, token: &RefreshToken) -> Result<()> {
        self.tokens
            .write()
            .await
            .insert(token.token_hash.clone(), token.clone());
        Ok(())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>> {
        Ok(self.tokens.read().await.get(token_hash).cloned())
    }

    async fn revoke(&self, token_hash: &str) -> Result<()> {
        if let Some(token) = self.tokens.write().await.get_mut(token_hash) {
            token.revoked = true;
        }
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: &str) -> Result<()> {
        for token in self.tokens.write().await.values_mut() {
            if token.user_id == user_id {
                token.revoked = true;
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryPasswordResetRepository {
    resets: RwLock<HashMap<String, PasswordReset>>,
}

impl MemoryPasswordResetRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PasswordResetRepository for MemoryPasswordResetRepository {
    async fn create(&self, reset: &PasswordReset) -> Result<()> {
        self.resets
            .write()
            .await
            .insert(reset.id.clone(), reset.clone());
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<PasswordReset>> {
        Ok(self
            .resets
            .read()
            .await
            .values()
            .find(|r| r.token == token)
            .cloned())
    }

    async fn mark_used(&self, id: &str) -> Result<()> {
        if let Some(reset) = self.resets.write().await.get_mut(id) {
            reset.used = true;
        }
        Ok(())
    }

    async fn delete_for_user(&self, user_id: &str) -> Result<()> {
        self.resets.write().await.retain(|_, r| r.user_id != user_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryBackupCodeRepository {
    codes: RwLock<HashMap<String, BackupCode>>,
}

impl MemoryBackupCodeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BackupCodeRepository for MemoryBackupCodeRepository {
    async fn replace_for_user(&self, user_id: &str, codes: &[BackupCode]) -> Result<()> {
        let mut store = self.codes.write().await;
        store.retain(|_, c| c.user_id != user_id);
        for code in codes {
            store.insert(code.id.clone(), code.clone());
        }
        Ok(())
    }

    async fn find_unused_by_user(&self, user_id: &str) -> Result<Vec<BackupCode>> {
        Ok(self
            .codes
            .read()
            .await
            .values()
            .filter(|c| c.user_id == user_id && !c.used)
            .cloned()
            .collect())
    }

    async fn mark_used(&self, id: &str) -> Result<()> {
        if let Some(code) = self.codes.write().await.get_mut(id) {
            code.used = true;
        }
        Ok(())
    }

    async fn delete_for_user(&self, user_id: &str) -> Result<()> {
        self.codes.write().await.retain(|_, c| c.user_id != user_id);
        Ok(())
    }
}
