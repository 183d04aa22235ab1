use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use rand::rngs::OsRng;
use tracing::{debug, instrument};

use super::domain::AuthAccount;
use super::repository::AccountRepository;
use crate::errors::ServiceError;

/// Algorithm tag written alongside every stored hash.
pub const PASSWORD_ALGORITHM: &str = "argon2";

/// Hash a plaintext password with a fresh salt.
pub fn hash_password(plain: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| ServiceError::Repository(format!("hashing failed: {e}")))?
        .to_string();
    Ok(hash)
}

/// Auth business service independent of web framework
pub struct AuthService<R: AccountRepository> {
    repo: Arc<R>,
}

impl<R: AccountRepository> AuthService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Verify a username/password pair against the stored account.
    ///
    /// Blank inputs fail with `InvalidCredentials` before any store access;
    /// an unknown username is `UserNotFound`, a hash mismatch is
    /// `InvalidCredentials`, and a backend fault is `Repository`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{hash_password, AuthService, PASSWORD_ALGORITHM};
    /// use service::auth::repository::{mock::MockAccountRepository, AccountRepository};
    /// let repo = Arc::new(MockAccountRepository::default());
    /// let hash = hash_password("eliza123").unwrap();
    /// tokio_test::block_on(repo.create("eliza", &hash, PASSWORD_ALGORITHM)).unwrap();
    /// let svc = AuthService::new(repo);
    /// let account = tokio_test::block_on(svc.authenticate("eliza", "eliza123")).unwrap();
    /// assert_eq!(account.username, "eliza");
    /// ```
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<AuthAccount, ServiceError> {
        if username.trim().is_empty() {
            return Err(ServiceError::InvalidCredentials("username cannot be empty".into()));
        }
        if password.trim().is_empty() {
            return Err(ServiceError::InvalidCredentials("password cannot be empty".into()));
        }

        let account = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::UserNotFound(format!("user not found: {username}")))?;

        let parsed = PasswordHash::new(&account.password_hash)
            .map_err(|e| ServiceError::Repository(format!("stored hash unreadable: {e}")))?;
        if Argon2::default().verify_password(password.as_bytes(), &parsed).is_err() {
            return Err(ServiceError::InvalidCredentials(format!(
                "invalid password for user: {username}"
            )));
        }

        debug!(user_id = account.id, "login verified");
        Ok(account.as_auth_account())
    }

    /// Resolve an account by id.
    pub async fn get_account(&self, user_id: i64) -> Result<AuthAccount, ServiceError> {
        let account = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::UserNotFound(format!("user not found: {user_id}")))?;
        Ok(account.as_auth_account())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::domain::AccountRecord;
    use crate::auth::repository::mock::MockAccountRepository;
    use async_trait::async_trait;

    async fn seeded_service() -> (Arc<MockAccountRepository>, AuthService<MockAccountRepository>, i64) {
        let repo = Arc::new(MockAccountRepository::default());
        let hash = hash_password("eliza123").unwrap();
        let account = repo.create("eliza", &hash, PASSWORD_ALGORITHM).await.unwrap();
        let svc = AuthService::new(repo.clone());
        (repo, svc, account.id)
    }

    /// Repository that fails the test if the service reaches the store.
    struct UnreachableRepo;

    #[async_trait]
    impl AccountRepository for UnreachableRepo {
        async fn find_by_id(&self, _id: i64) -> Result<Option<AccountRecord>, ServiceError> {
            unreachable!("store must not be touched")
        }
        async fn find_by_username(&self, _username: &str) -> Result<Option<AccountRecord>, ServiceError> {
            unreachable!("store must not be touched")
        }
        async fn exists_by_id(&self, _id: i64) -> Result<bool, ServiceError> {
            unreachable!("store must not be touched")
        }
        async fn count(&self) -> Result<u64, ServiceError> {
            unreachable!("store must not be touched")
        }
        async fn create(&self, _u: &str, _h: &str, _a: &str) -> Result<AccountRecord, ServiceError> {
            unreachable!("store must not be touched")
        }
    }

    #[tokio::test]
    async fn blank_credentials_short_circuit_before_store_access() {
        let svc = AuthService::new(Arc::new(UnreachableRepo));
        for (u, p) in [("", "pw"), ("   ", "pw"), ("eliza", ""), ("eliza", "  ")] {
            let err = svc.authenticate(u, p).await.unwrap_err();
            assert!(matches!(err, ServiceError::InvalidCredentials(_)), "{u:?}/{p:?}: {err}");
        }
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials_not_user_not_found() {
        let (_repo, svc, _) = seeded_service().await;
        let err = svc.authenticate("eliza", "wrong").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials(_)));
    }

    #[tokio::test]
    async fn unknown_username_is_user_not_found() {
        let (_repo, svc, _) = seeded_service().await;
        let err = svc.authenticate("nobody", "whatever").await.unwrap_err();
        assert!(matches!(err, ServiceError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn correct_credentials_return_the_account() {
        let (_repo, svc, id) = seeded_service().await;
        let account = svc.authenticate("eliza", "eliza123").await.unwrap();
        assert_eq!(account.id, id);
        assert_eq!(account.username, "eliza");
    }

    #[tokio::test]
    async fn get_account_reports_missing_id() {
        let (_repo, svc, id) = seeded_service().await;
        assert_eq!(svc.get_account(id).await.unwrap().username, "eliza");
        let err = svc.get_account(id + 100).await.unwrap_err();
        assert!(matches!(err, ServiceError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn unreadable_stored_hash_is_a_repository_fault() {
        let repo = Arc::new(MockAccountRepository::default());
        repo.create("broken", "not-a-phc-hash", PASSWORD_ALGORITHM).await.unwrap();
        let svc = AuthService::new(repo);
        let err = svc.authenticate("broken", "pw").await.unwrap_err();
        assert!(matches!(err, ServiceError::Repository(_)));
    }

    #[test]
    fn hashes_are_salted_and_verifiable() {
        let h1 = hash_password("secret").unwrap();
        let h2 = hash_password("secret").unwrap();
        assert_ne!(h1, h2);
        let parsed = PasswordHash::new(&h1).unwrap();
        assert!(Argon2::default().verify_password(b"secret", &parsed).is_ok());
    }
}
