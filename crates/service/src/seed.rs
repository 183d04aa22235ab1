//! One-time default-account seeding, run at boot.
//!
//! Gated on an emptiness check so a restart never duplicates accounts; the
//! caller decides whether a failure is fatal (startup logs and continues).

use tracing::{debug, info};

use crate::auth::repository::AccountRepository;
use crate::auth::{hash_password, PASSWORD_ALGORITHM};
use crate::errors::ServiceError;

/// Fixed demo accounts created on first boot.
pub const DEFAULT_ACCOUNTS: [(&str, &str); 2] = [("eliza", "eliza123"), ("admin", "admin123")];

/// Create the default accounts when the store is empty; returns how many
/// were created (0 when seeding was skipped).
pub async fn seed_default_accounts<R: AccountRepository>(repo: &R) -> Result<u32, ServiceError> {
    if repo.count().await? > 0 {
        debug!("accounts already present, skipping seed");
        return Ok(0);
    }

    let mut created = 0;
    for (username, password) in DEFAULT_ACCOUNTS {
        let hash = hash_password(password)?;
        let account = repo.create(username, &hash, PASSWORD_ALGORITHM).await?;
        info!(user_id = account.id, username, "seeded default account");
        created += 1;
    }
    Ok(created)
}
