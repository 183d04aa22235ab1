use serde::{Deserialize, Serialize};

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Authenticated account (business view, never carries the hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthAccount {
    pub id: i64,
    pub username: String,
}

/// Stored account as the repository sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub password_algorithm: String,
}

impl AccountRecord {
    pub fn as_auth_account(&self) -> AuthAccount {
        AuthAccount { id: self.id, username: self.username.clone() }
    }
}
