use chrono::{NaiveDate, Utc};
use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::account;
use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: String,
    pub from_date: Date,
    pub from_time: Option<String>,
    pub genre: String,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Account,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Account => Entity::belongs_to(account::Entity)
                .from(Column::UserId)
                .to(account::Column::Id)
                .into(),
        }
    }
}

impl Related<account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Column bound mirrors the schema cap on `notes`.
pub const NOTES_MAX_LEN: usize = 4000;

#[allow(clippy::too_many_arguments)]
pub async fn create(
    db: &DatabaseConnection,
    user_id: i64,
    name: &str,
    description: &str,
    from_date: NaiveDate,
    from_time: Option<&str>,
    genre: &str,
    notes: Option<&str>,
) -> Result<Model, errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    if description.trim().is_empty() {
        return Err(errors::ModelError::Validation("description required".into()));
    }
    if genre.trim().is_empty() {
        return Err(errors::ModelError::Validation("genre required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: NotSet,
        user_id: Set(user_id),
        name: Set(name.to_string()),
        description: Set(description.to_string()),
        from_date: Set(from_date),
        from_time: Set(from_time.map(|t| t.to_string())),
        genre: Set(genre.to_string()),
        notes: Set(notes.map(|n| n.to_string())),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_user_id(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_user_id_and_from_date(
    db: &DatabaseConnection,
    user_id: i64,
    from_date: NaiveDate,
) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::FromDate.eq(from_date))
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Deterministic listing: date ascending, then free-text time ascending.
pub async fn find_by_user_id_ordered(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_asc(Column::FromDate)
        .order_by_asc(Column::FromTime)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Overwrite notes on an existing appointment; `None` result means the id
/// does not exist.
pub async fn set_notes(
    db: &DatabaseConnection,
    id: i64,
    notes: Option<&str>,
) -> Result<Option<Model>, errors::ModelError> {
    if let Some(n) = notes {
        if n.len() > NOTES_MAX_LEN {
            return Err(errors::ModelError::Validation(format!(
                "notes too long (<={NOTES_MAX_LEN})"
            )));
        }
    }
    let found = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    let Some(found) = found else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    am.notes = Set(notes.map(|n| n.to_string()));
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(Some(updated))
}

/// Returns the number of rows removed (0 when the id was absent).
pub async fn delete_by_id(db: &DatabaseConnection, id: i64) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

pub async fn delete_by_user_id_and_from_date(
    db: &DatabaseConnection,
    user_id: i64,
    from_date: NaiveDate,
) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_many()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::FromDate.eq(from_date))
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

pub async fn exists_by_id(db: &DatabaseConnection, id: i64) -> Result<bool, errors::ModelError> {
    let found = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(found.is_some())
}
