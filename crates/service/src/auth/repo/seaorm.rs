use sea_orm::DatabaseConnection;

use crate::auth::domain::AccountRecord;
use crate::auth::repository::AccountRepository;
use crate::errors::ServiceError;

pub struct SeaOrmAccountRepository {
    pub db: DatabaseConnection,
}

fn to_record(m: models::account::Model) -> AccountRecord {
    AccountRecord {
        id: m.id,
        username: m.username,
        password_hash: m.password_hash,
        password_algorithm: m.password_algorithm,
    }
}

#[async_trait::async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<AccountRecord>, ServiceError> {
        use sea_orm::EntityTrait;
        let res = models::account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Repository(e.to_string()))?;
        Ok(res.map(to_record))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AccountRecord>, ServiceError> {
        let res = models::account::find_by_username(&self.db, username)
            .await
            .map_err(|e| ServiceError::Repository(e.to_string()))?;
        Ok(res.map(to_record))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        models::account::exists_by_id(&self.db, id)
            .await
            .map_err(|e| ServiceError::Repository(e.to_string()))
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        models::account::count(&self.db)
            .await
            .map_err(|e| ServiceError::Repository(e.to_string()))
    }

    async fn create(
        &self,
        username: &str,
        password_hash: &str,
        password_algorithm: &str,
    ) -> Result<AccountRecord, ServiceError> {
        let created = models::account::create(&self.db, username, password_hash, password_algorithm)
            .await
            .map_err(|e| ServiceError::Repository(e.to_string()))?;
        Ok(to_record(created))
    }
}
