use async_trait::async_trait;
use sqlx::{MySql, Pool};

use super::interface::{
    AuthError, BackupCodeRepository, PasswordResetRepository, RefreshTokenRepository, Result,
    UserRepository,
};
use super::model::{BackupCode, PasswordReset, RefreshToken, User, UserStatus};

#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: Pool<MySql>,
}

impl MySqlUserRepository {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn create(&self, user: &User) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, email, full_name, password_hash, role, status, two_factor_enabled, two_factor_secret, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.status)
        .bind(user.two_factor_enabled)
        .bind(&user.two_factor_secret)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AuthError::EmailAlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list(&self) -> Result<Vec<User>> {
        Ok(
            sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn update_password(&self, user_id: &str, password_hash: &str) -> Result<()> {
        sqlx::query("UPDATE users SET password_hash = ?, updated_at = NOW() WHERE id = ?")
            .bind(password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_status(&self, user_id: &str, status: UserStatus) -> Result<()> {
        sqlx::query("UPDATE users SET status = ?, updated_at = NOW() WHERE id = ?")
            .bind(status)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_two_factor(
        &self,
        user_id: &str,
        enabled: bool,
        secret: Option<&str>,
    ) -> Result<()> {
        // Deliberately does not touch updated_at: toggling 2FA is not a
        // credential change that should fence out the current session.
        sqlx::query("UPDATE users SET two_factor_enabled = ?, two_factor_secret = ? WHERE id = ?")
            .bind(enabled)
            .bind(secret)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct MySqlRefreshTokenRepository {
    pool: Pool<MySql>,
}

impl MySqlRefreshTokenRepository {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for MySqlRefreshTokenRepository {
    async fn create(&self, token: &RefreshToken) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, user_id, token_hash, expires_at, revoked, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&token.id)
        .bind(&token.user_id)
        .bind(&token.token_hash)
        .bind(token.expires_at)
        .bind(token.revoked)
        .bind(token.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>> {
        Ok(sqlx::query_as::<_, RefreshToken>(
            "SELECT * FROM refresh_tokens WHERE token_hash = ?",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn revoke(&self, token_hash: &str) -> Result<()> {
        sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE token_hash = ?")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: &str) -> Result<()> {
        sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct MySqlPasswordResetRepository {
    pool: Pool<MySql>,
}

impl MySqlPasswordResetRepository {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PasswordResetRepository for MySqlPasswordResetRepository {
    async fn create(&self, reset: &PasswordReset) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO password_resets (id, user_id, token, expires_at, used, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&reset.id)
        .bind(&reset.user_id)
        .bind(&reset.token)
        .bind(reset.expires_at)
        .bind(reset.used)
        .bind(reset.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<PasswordReset>> {
        Ok(sqlx::query_as::<_, PasswordReset>(
            "SELECT * FROM password_resets WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn mark_used(&self, id: &str) -> Result<()> {
        sqlx::query("UPDATE password_resets SET used = TRUE WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_for_user(&self, user_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM password_resets WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct MySqlBackupCodeRepository {
    pool: Pool<MySql>,
}

impl MySqlBackupCodeRepository {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BackupCodeRepository for MySqlBackupCodeRepository {
    async fn replace_for_user(&self, user_id: &str, codes: &[BackupCode]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM backup_codes WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        for code in codes {
            sqlx::query(
                r#"
                INSERT INTO backup_codes (id, user_id, code_hash, used, created_at)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(&code.id)
            .bind(&code.user_id)
            .bind(&code.code_hash)
            .bind(code.used)
            .bind(code.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_unused_by_user(&self, user_id: &str) -> Result<Vec<BackupCode>> {
        Ok(sqlx::query_as::<_, BackupCode>(
            "SELECT * FROM backup_codes WHERE user_id = ? AND used = FALSE",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn mark_used(&self, id: &str) -> Result<()> {
        sqlx::query("UPDATE backup_codes SET used = TRUE WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_for_user(&self, user_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM backup_codes WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
