use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, PaginatorTrait, Set};
use serde::{Deserialize, Serialize};

use crate::appointment;
use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub password_algorithm: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Appointment,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Appointment => Entity::has_many(appointment::Entity).into(),
        }
    }
}

impl Related<appointment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_username(username: &str) -> Result<(), errors::ModelError> {
    if username.trim().is_empty() {
        return Err(errors::ModelError::Validation("username required".into()));
    }
    if username.len() > 64 {
        return Err(errors::ModelError::Validation("username too long (<=64)".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    username: &str,
    password_hash: &str,
    password_algorithm: &str,
) -> Result<Model, errors::ModelError> {
    validate_username(username)?;
    if password_hash.trim().is_empty() {
        return Err(errors::ModelError::Validation("password hash required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: NotSet,
        username: Set(username.to_string()),
        password_hash: Set(password_hash.to_string()),
        password_algorithm: Set(password_algorithm.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Username.eq(username))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn exists_by_id(db: &DatabaseConnection, id: i64) -> Result<bool, errors::ModelError> {
    let found = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(found.is_some())
}

pub async fn count(db: &DatabaseConnection) -> Result<u64, errors::ModelError> {
    Entity::find()
        .count(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::validate_username;

    #[test]
    fn blank_username_rejected() {
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
    }

    #[test]
    fn overlong_username_rejected() {
        assert!(validate_username(&"a".repeat(65)).is_err());
    }

    #[test]
    fn reasonable_username_accepted() {
        assert!(validate_username("eliza").is_ok());
    }
}
