use async_trait::async_trait;

use super::domain::AccountRecord;
use crate::errors::ServiceError;

/// Repository abstraction for account persistence.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<AccountRecord>, ServiceError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<AccountRecord>, ServiceError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;

    async fn create(
        &self,
        username: &str,
        password_hash: &str,
        password_algorithm: &str,
    ) -> Result<AccountRecord, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAccountRepository {
        accounts: Mutex<HashMap<i64, AccountRecord>>, // key: id
        next_id: AtomicI64,
    }

    #[async_trait]
    impl AccountRepository for MockAccountRepository {
        async fn find_by_id(&self, id: i64) -> Result<Option<AccountRecord>, ServiceError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.get(&id).cloned())
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<AccountRecord>, ServiceError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.values().find(|a| a.username == username).cloned())
        }

        async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.contains_key(&id))
        }

        async fn count(&self) -> Result<u64, ServiceError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.len() as u64)
        }

        async fn create(
            &self,
            username: &str,
            password_hash: &str,
            password_algorithm: &str,
        ) -> Result<AccountRecord, ServiceError> {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.values().any(|a| a.username == username) {
                return Err(ServiceError::Repository(format!("duplicate username: {username}")));
            }
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let record = AccountRecord {
                id,
                username: username.to_string(),
                password_hash: password_hash.to_string(),
                password_algorithm: password_algorithm.to_string(),
            };
            accounts.insert(id, record.clone());
            Ok(record)
        }
    }
}
