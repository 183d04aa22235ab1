use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crate::appointment::domain::{Appointment, CreateAppointment};
use crate::appointment::repository::AppointmentRepository;
use crate::errors::ServiceError;
use models::errors::ModelError;

pub struct SeaOrmAppointmentRepository {
    pub db: DatabaseConnection,
}

fn to_domain(m: models::appointment::Model) -> Appointment {
    Appointment {
        id: m.id,
        user_id: m.user_id,
        name: m.name,
        description: m.description,
        from_date: m.from_date,
        from_time: m.from_time,
        genre: m.genre,
        notes: m.notes,
    }
}

// Column-level validation (e.g. the notes length cap) keeps its own kind;
// anything else from the store is an infrastructure fault.
fn map_err(e: ModelError) -> ServiceError {
    match e {
        ModelError::Validation(msg) => ServiceError::InvalidAppointmentData(msg),
        ModelError::Db(msg) => ServiceError::Repository(msg),
    }
}

#[async_trait::async_trait]
impl AppointmentRepository for SeaOrmAppointmentRepository {
    async fn insert(&self, input: CreateAppointment) -> Result<Appointment, ServiceError> {
        let created = models::appointment::create(
            &self.db,
            input.user_id,
            &input.name,
            &input.description,
            input.from_date,
            input.from_time.as_deref(),
            &input.genre,
            input.notes.as_deref(),
        )
        .await
        .map_err(map_err)?;
        Ok(to_domain(created))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, ServiceError> {
        use sea_orm::EntityTrait;
        let res = models::appointment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Repository(e.to_string()))?;
        Ok(res.map(to_domain))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        models::appointment::exists_by_id(&self.db, id).await.map_err(map_err)
    }

    async fn set_notes(&self, id: i64, notes: Option<String>) -> Result<Option<Appointment>, ServiceError> {
        let res = models::appointment::set_notes(&self.db, id, notes.as_deref())
            .await
            .map_err(map_err)?;
        Ok(res.map(to_domain))
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, ServiceError> {
        models::appointment::delete_by_id(&self.db, id).await.map_err(map_err)
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Appointment>, ServiceError> {
        let rows = models::appointment::find_by_user_id(&self.db, user_id).await.map_err(map_err)?;
        Ok(rows.into_iter().map(to_domain).collect())
    }

    async fn find_by_user_id_and_date(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, ServiceError> {
        let rows = models::appointment::find_by_user_id_and_from_date(&self.db, user_id, date)
            .await
            .map_err(map_err)?;
        Ok(rows.into_iter().map(to_domain).collect())
    }

    async fn find_by_user_id_ordered(&self, user_id: i64) -> Result<Vec<Appointment>, ServiceError> {
        let rows = models::appointment::find_by_user_id_ordered(&self.db, user_id)
            .await
            .map_err(map_err)?;
        Ok(rows.into_iter().map(to_domain).collect())
    }

    async fn delete_by_user_id_and_date(&self, user_id: i64, date: NaiveDate) -> Result<u64, ServiceError> {
        models::appointment::delete_by_user_id_and_from_date(&self.db, user_id, date)
            .await
            .map_err(map_err)
    }
}
