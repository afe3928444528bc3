use sha2::{Digest, Sha256};
use totp_rs::{Algorithm, Secret, TOTP};

/// Number of single-use recovery codes issued when 2FA is activated.
pub const BACKUP_CODE_COUNT: usize = 12;

const ISSUER: &str = "Campus Portal";

#[derive(Debug, thiserror::Error)]
pub enum TotpError {
    #[error("Invalid TOTP secret")]
    InvalidSecret,

    #[error("Clock error: {0}")]
    Clock(String),
}

/// Generate a fresh base32-encoded TOTP secret.
pub fn generate_secret() -> String {
    Secret::generate_secret().to_encoded().to_string()
}

fn totp_for(secret: &str, account: &str) -> Result<TOTP, TotpError> {
    let bytes = Secret::Encoded(secret.to_string())
        .to_bytes()
        .map_err(|_| TotpError::InvalidSecret)?;
    TOTP::new(
        Algorithm::SHA1,
        6,
        1,
        30,
        bytes,
        Some(ISSUER.to_string()),
        account.to_string(),
    )
    .map_err(|_| TotpError::InvalidSecret)
}

/// Provisioning URI for authenticator apps.
pub fn otpauth_url(secret: &str, account: &str) -> Result<String, TotpError> {
    Ok(totp_for(secret, account)?.get_url())
}

/// Check a 6-digit time-based code against the secret, allowing one step of
/// clock skew either way.
pub fn verify_code(secret: &str, code: &str) -> Result<bool, TotpError> {
    let totp = totp_for(secret, "verify")?;
    totp.check_current(code).map_err(|e| TotpError::Clock(e.to_string()))
}

/// Current valid code for a secret. Used by demo tooling and tests.
pub fn current_code(secret: &str) -> Result<String, TotpError> {
    let totp = totp_for(secret, "verify")?;
    totp.generate_current().map_err(|e| TotpError::Clock(e.to_string()))
}

/// Generate the recovery-code set shown to the user exactly once.
pub fn generate_backup_codes() -> Vec<String> {
    (0..BACKUP_CODE_COUNT)
        .map(|_| {
            let bytes: [u8; 5] = rand::random();
            let s = hex::encode(bytes).to_uppercase();
            format!("{}-{}", &s[..5], &s[5..])
        })
        .collect()
}

/// Digest stored in place of the plaintext recovery code. Input is
/// normalized so `abcde-12345` and `ABCDE12345` hash identically.
pub fn hash_backup_code(code: &str) -> String {
    let normalized: String = code
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_uppercase();
    hex::encode(Sha256::digest(normalized.as_bytes()))
}
