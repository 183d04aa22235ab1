use async_trait::async_trait;
use chrono::NaiveDate;

use super::domain::{Appointment, CreateAppointment};
use crate::errors::ServiceError;

/// Repository abstraction for appointment persistence.
///
/// Delete operations report the number of rows removed so callers can stay
/// idempotent without a prior existence probe.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn insert(&self, input: CreateAppointment) -> Result<Appointment, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, ServiceError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    async fn set_notes(&self, id: i64, notes: Option<String>) -> Result<Option<Appointment>, ServiceError>;
    async fn delete_by_id(&self, id: i64) -> Result<u64, ServiceError>;

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Appointment>, ServiceError>;
    async fn find_by_user_id_and_date(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, ServiceError>;
    async fn find_by_user_id_ordered(&self, user_id: i64) -> Result<Vec<Appointment>, ServiceError>;
    async fn delete_by_user_id_and_date(&self, user_id: i64, date: NaiveDate) -> Result<u64, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAppointmentRepository {
        appointments: Mutex<BTreeMap<i64, Appointment>>, // key: id
        next_id: AtomicI64,
    }

    #[async_trait]
    impl AppointmentRepository for MockAppointmentRepository {
        async fn insert(&self, input: CreateAppointment) -> Result<Appointment, ServiceError> {
            let mut appointments = self.appointments.lock().unwrap();
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let stored = Appointment {
                id,
                user_id: input.user_id,
                name: input.name,
                description: input.description,
                from_date: input.from_date,
                from_time: input.from_time,
                genre: input.genre,
                notes: input.notes,
            };
            appointments.insert(id, stored.clone());
            Ok(stored)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, ServiceError> {
            let appointments = self.appointments.lock().unwrap();
            Ok(appointments.get(&id).cloned())
        }

        async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            let appointments = self.appointments.lock().unwrap();
            Ok(appointments.contains_key(&id))
        }

        async fn set_notes(&self, id: i64, notes: Option<String>) -> Result<Option<Appointment>, ServiceError> {
            let mut appointments = self.appointments.lock().unwrap();
            Ok(appointments.get_mut(&id).map(|a| {
                a.notes = notes;
                a.clone()
            }))
        }

        async fn delete_by_id(&self, id: i64) -> Result<u64, ServiceError> {
            let mut appointments = self.appointments.lock().unwrap();
            Ok(appointments.remove(&id).map(|_| 1).unwrap_or(0))
        }

        async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Appointment>, ServiceError> {
            let appointments = self.appointments.lock().unwrap();
            Ok(appointments.values().filter(|a| a.user_id == user_id).cloned().collect())
        }

        async fn find_by_user_id_and_date(
            &self,
            user_id: i64,
            date: NaiveDate,
        ) -> Result<Vec<Appointment>, ServiceError> {
            let appointments = self.appointments.lock().unwrap();
            Ok(appointments
                .values()
                .filter(|a| a.user_id == user_id && a.from_date == date)
                .cloned()
                .collect())
        }

        async fn find_by_user_id_ordered(&self, user_id: i64) -> Result<Vec<Appointment>, ServiceError> {
            let appointments = self.appointments.lock().unwrap();
            let mut owned: Vec<Appointment> =
                appointments.values().filter(|a| a.user_id == user_id).cloned().collect();
            owned.sort_by(|a, b| (a.from_date, &a.from_time).cmp(&(b.from_date, &b.from_time)));
            Ok(owned)
        }

        async fn delete_by_user_id_and_date(&self, user_id: i64, date: NaiveDate) -> Result<u64, ServiceError> {
            let mut appointments = self.appointments.lock().unwrap();
            let doomed: Vec<i64> = appointments
                .values()
                .filter(|a| a.user_id == user_id && a.from_date == date)
                .map(|a| a.id)
                .collect();
            for id in &doomed {
                appointments.remove(id);
            }
            Ok(doomed.len() as u64)
        }
    }
}
