//! Demo-mode wiring: the full portal on in-memory repositories with a
//! seeded roster, so the service runs without MySQL. The integration test
//! suite builds on the same state.

use std::sync::Arc;

use crate::config::Config;
use crate::modules::attendance::memory::MemoryAttendanceRepository;
use crate::modules::audit::memory::MemoryAuditLogRepository;
use crate::modules::auth::interface::{AuthError, UserRepository};
use crate::modules::auth::memory::{
    MemoryBackupCodeRepository, MemoryPasswordResetRepository, MemoryRefreshTokenRepository,
    MemoryUserRepository,
};
use crate::modules::auth::model::{Role, User};
use crate::modules::classes::interface::ClassRepository;
use crate::modules::classes::memory::MemoryClassRepository;
use crate::modules::classes::model::Class;
use crate::modules::grades::memory::MemoryGradeRepository;
use crate::services::hashing;
use crate::AppState;

/// Seeded demo accounts, one per role.
pub const DEMO_ACCOUNTS: &[(&str, &str, &str, Role)] = &[
    ("admin@campus.test", "Admin User", "Admin@12345", Role::Admin),
    ("teacher@campus.test", "Teacher User", "Teacher@12345", Role::Teacher),
    ("student@campus.test", "Student User", "Student@12345", Role::Student),
    ("parent@campus.test", "Parent User", "Parent@12345", Role::Parent),
];

pub async fn demo_state(config: Config) -> Result<AppState, AuthError> {
    let users = Arc::new(MemoryUserRepository::new());
    let classes = Arc::new(MemoryClassRepository::new());

    let mut teacher_id = None;
    for (email, full_name, password, role) in DEMO_ACCOUNTS {
        let hash =
            hashing::hash_password(password).map_err(|e| AuthError::Internal(e.to_string()))?;
        let user = User::new(email, full_name, hash, *role);
        if *role == Role::Teacher {
            teacher_id = Some(user.id.clone());
        }
        users.create(&user).await?;
    }

    if let Some(teacher_id) = teacher_id {
        classes
            .create(&Class::new("Demo Class 10A", &teacher_id))
            .await?;
    }

    Ok(AppState::new(
        users,
        Arc::new(MemoryRefreshTokenRepository::new()),
        Arc::new(MemoryPasswordResetRepository::new()),
        Arc::new(MemoryBackupCodeRepository::new()),
        classes,
        Arc::new(MemoryGradeRepository::new()),
        Arc::new(MemoryAttendanceRepository::new()),
        Arc::new(MemoryAuditLogRepository::new()),
        config,
    ))
}
