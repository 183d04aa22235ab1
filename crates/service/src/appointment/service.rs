use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use super::domain::{Appointment, CreateAppointment, NewAppointment};
use super::repository::AppointmentRepository;
use crate::auth::repository::AccountRepository;
use crate::errors::ServiceError;

/// Appointment business service.
///
/// Validates creation payloads field by field, resolves the owning account,
/// and keeps every appointment scoped to its owner. All failures are
/// classified `ServiceError` kinds; validation runs before any store access.
pub struct AppointmentService<A: AccountRepository, R: AppointmentRepository> {
    accounts: Arc<A>,
    appointments: Arc<R>,
}

impl<A: AccountRepository, R: AppointmentRepository> AppointmentService<A, R> {
    pub fn new(accounts: Arc<A>, appointments: Arc<R>) -> Self {
        Self { accounts, appointments }
    }

    async fn ensure_user(&self, user_id: i64) -> Result<(), ServiceError> {
        if !self.accounts.exists_by_id(user_id).await? {
            return Err(ServiceError::UserNotFound(format!("user not found: {user_id}")));
        }
        Ok(())
    }

    // Check order is part of the contract: name, fromDate, description,
    // genre; the first failing field is the one reported.
    fn validate(input: &NewAppointment) -> Result<NaiveDate, ServiceError> {
        if input.name.trim().is_empty() {
            return Err(ServiceError::InvalidAppointmentData("name is required".into()));
        }
        let from_date = input
            .from_date
            .ok_or_else(|| ServiceError::InvalidAppointmentData("fromDate is required".into()))?;
        if input.description.trim().is_empty() {
            return Err(ServiceError::InvalidAppointmentData("description is required".into()));
        }
        if input.genre.trim().is_empty() {
            return Err(ServiceError::InvalidAppointmentData("genre is required".into()));
        }
        Ok(from_date)
    }

    /// Create an appointment owned by `user_id`. Any owner supplied inside
    /// the payload is ignored; ownership is bound server-side.
    #[instrument(skip(self, input))]
    pub async fn create_appointment(
        &self,
        input: NewAppointment,
        user_id: i64,
    ) -> Result<Appointment, ServiceError> {
        let from_date = Self::validate(&input)?;
        self.ensure_user(user_id).await?;

        let created = self
            .appointments
            .insert(CreateAppointment {
                user_id,
                name: input.name,
                description: input.description,
                from_date,
                from_time: input.from_time,
                genre: input.genre,
                notes: input.notes,
            })
            .await?;
        info!(appointment_id = created.id, user_id, "appointment created");
        Ok(created)
    }

    /// All appointments for a user, storage order.
    pub async fn list_user_appointments(&self, user_id: i64) -> Result<Vec<Appointment>, ServiceError> {
        self.ensure_user(user_id).await?;
        self.appointments.find_by_user_id(user_id).await
    }

    /// All appointments for a user, date then time ascending.
    pub async fn list_user_appointments_ordered(
        &self,
        user_id: i64,
    ) -> Result<Vec<Appointment>, ServiceError> {
        self.ensure_user(user_id).await?;
        self.appointments.find_by_user_id_ordered(user_id).await
    }

    /// Appointments for a user on exactly the given date; an empty result is
    /// a success, not a failure.
    pub async fn list_user_appointments_by_date(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, ServiceError> {
        self.ensure_user(user_id).await?;
        self.appointments.find_by_user_id_and_date(user_id, date).await
    }

    /// Lookup by id with no ownership check; callers that act on behalf of a
    /// user should prefer [`get_appointment_for_user`](Self::get_appointment_for_user).
    pub async fn get_appointment(&self, appointment_id: i64) -> Result<Appointment, ServiceError> {
        self.appointments
            .find_by_id(appointment_id)
            .await?
            .ok_or_else(|| ServiceError::AppointmentNotFound(format!("appointment not found: {appointment_id}")))
    }

    /// Overwrite notes unconditionally; `None` clears them.
    #[instrument(skip(self, notes))]
    pub async fn update_notes(
        &self,
        appointment_id: i64,
        notes: Option<String>,
    ) -> Result<Appointment, ServiceError> {
        self.appointments
            .set_notes(appointment_id, notes)
            .await?
            .ok_or_else(|| ServiceError::AppointmentNotFound(format!("appointment not found: {appointment_id}")))
    }

    /// Idempotent delete: a missing id is a silent no-op. Returns whether a
    /// row was actually removed.
    #[instrument(skip(self))]
    pub async fn delete_appointment(&self, appointment_id: i64) -> Result<bool, ServiceError> {
        let removed = self.appointments.delete_by_id(appointment_id).await?;
        if removed > 0 {
            info!(appointment_id, "appointment deleted");
        } else {
            debug!(appointment_id, "delete of missing appointment ignored");
        }
        Ok(removed > 0)
    }

    /// Bulk delete of a user's appointments on one date; returns the count
    /// removed.
    #[instrument(skip(self))]
    pub async fn delete_user_appointments_by_date(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<u64, ServiceError> {
        self.ensure_user(user_id).await?;
        let removed = self.appointments.delete_by_user_id_and_date(user_id, date).await?;
        info!(user_id, %date, removed, "appointments removed for date");
        Ok(removed)
    }

    /// Owner-scoped lookup: an appointment belonging to someone else is
    /// reported as not found, never as a different failure kind.
    pub async fn get_appointment_for_user(
        &self,
        user_id: i64,
        appointment_id: i64,
    ) -> Result<Appointment, ServiceError> {
        let appointment = self.get_appointment(appointment_id).await?;
        if appointment.user_id != user_id {
            return Err(ServiceError::AppointmentNotFound(format!(
                "appointment not found: {appointment_id}"
            )));
        }
        Ok(appointment)
    }

    /// Owner-scoped notes update.
    #[instrument(skip(self, notes))]
    pub async fn update_notes_for_user(
        &self,
        user_id: i64,
        appointment_id: i64,
        notes: Option<String>,
    ) -> Result<Appointment, ServiceError> {
        self.get_appointment_for_user(user_id, appointment_id).await?;
        self.update_notes(appointment_id, notes).await
    }

    /// Owner-scoped idempotent delete; a foreign appointment is left alone
    /// and reported as not removed.
    #[instrument(skip(self))]
    pub async fn delete_appointment_for_user(
        &self,
        user_id: i64,
        appointment_id: i64,
    ) -> Result<bool, ServiceError> {
        match self.appointments.find_by_id(appointment_id).await? {
            Some(a) if a.user_id == user_id => self.delete_appointment(appointment_id).await,
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::repository::mock::MockAppointmentRepository;
    use crate::auth::repository::mock::MockAccountRepository;
    use crate::auth::PASSWORD_ALGORITHM;

    type TestService = AppointmentService<MockAccountRepository, MockAppointmentRepository>;

    async fn service_with_user() -> (TestService, i64) {
        let accounts = Arc::new(MockAccountRepository::default());
        let user = accounts.create("eliza", "$hash$", PASSWORD_ALGORITHM).await.unwrap();
        let svc = AppointmentService::new(accounts, Arc::new(MockAppointmentRepository::default()));
        (svc, user.id)
    }

    fn valid_input() -> NewAppointment {
        NewAppointment {
            name: "Checkup".into(),
            description: "Annual".into(),
            from_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            from_time: Some("14:00".into()),
            genre: "Medical".into(),
            notes: None,
        }
    }

    fn message_of(err: ServiceError) -> String {
        match err {
            ServiceError::InvalidAppointmentData(msg) => msg,
            other => panic!("expected InvalidAppointmentData, got {other}"),
        }
    }

    #[tokio::test]
    async fn missing_fields_fail_in_contract_order() {
        let (svc, user) = service_with_user().await;

        let blank = NewAppointment::default();
        assert_eq!(message_of(svc.create_appointment(blank, user).await.unwrap_err()), "name is required");

        let mut input = valid_input();
        input.from_date = None;
        input.description = String::new();
        assert_eq!(message_of(svc.create_appointment(input, user).await.unwrap_err()), "fromDate is required");

        let mut input = valid_input();
        input.description = "  ".into();
        input.genre = String::new();
        assert_eq!(
            message_of(svc.create_appointment(input, user).await.unwrap_err()),
            "description is required"
        );

        let mut input = valid_input();
        input.genre = "  ".into();
        assert_eq!(message_of(svc.create_appointment(input, user).await.unwrap_err()), "genre is required");

        // nothing was persisted along the way
        assert!(svc.list_user_appointments(user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_with_unknown_user_fails_even_when_payload_is_valid() {
        let (svc, user) = service_with_user().await;
        let err = svc.create_appointment(valid_input(), user + 99).await.unwrap_err();
        assert!(matches!(err, ServiceError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn create_then_get_round_trips_with_assigned_id_and_owner() {
        let (svc, user) = service_with_user().await;
        let created = svc.create_appointment(valid_input(), user).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.user_id, user);

        let fetched = svc.get_appointment(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Checkup");
        assert_eq!(fetched.genre, "Medical");
    }

    #[tokio::test]
    async fn listing_for_unknown_user_fails() {
        let (svc, user) = service_with_user().await;
        for result in [
            svc.list_user_appointments(user + 1).await,
            svc.list_user_appointments_ordered(user + 1).await,
            svc.list_user_appointments_by_date(user + 1, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
                .await,
        ] {
            assert!(matches!(result.unwrap_err(), ServiceError::UserNotFound(_)));
        }
    }

    #[tokio::test]
    async fn date_filter_with_no_matches_is_an_empty_success() {
        let (svc, user) = service_with_user().await;
        svc.create_appointment(valid_input(), user).await.unwrap();
        let empty = svc
            .list_user_appointments_by_date(user, NaiveDate::from_ymd_opt(2030, 1, 1).unwrap())
            .await
            .unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn ordered_listing_sorts_by_date_then_time() {
        let (svc, user) = service_with_user().await;
        let mut late = valid_input();
        late.name = "Late".into();
        late.from_time = Some("16:00".into());
        let mut early = valid_input();
        early.name = "Early".into();
        early.from_time = Some("08:00".into());
        let mut next_day = valid_input();
        next_day.name = "NextDay".into();
        next_day.from_date = NaiveDate::from_ymd_opt(2024, 5, 2);
        next_day.from_time = Some("07:00".into());

        svc.create_appointment(late, user).await.unwrap();
        svc.create_appointment(next_day, user).await.unwrap();
        svc.create_appointment(early, user).await.unwrap();

        let names: Vec<String> = svc
            .list_user_appointments_ordered(user)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["Early", "Late", "NextDay"]);
    }

    #[tokio::test]
    async fn update_notes_overwrites_and_reports_missing_ids() {
        let (svc, user) = service_with_user().await;
        let created = svc.create_appointment(valid_input(), user).await.unwrap();

        let updated = svc.update_notes(created.id, Some("bring referral".into())).await.unwrap();
        assert_eq!(updated.notes.as_deref(), Some("bring referral"));

        let cleared = svc.update_notes(created.id, None).await.unwrap();
        assert_eq!(cleared.notes, None);

        let err = svc.update_notes(created.id + 50, Some("x".into())).await.unwrap_err();
        assert!(matches!(err, ServiceError::AppointmentNotFound(_)));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (svc, user) = service_with_user().await;
        let created = svc.create_appointment(valid_input(), user).await.unwrap();

        assert!(svc.delete_appointment(created.id).await.unwrap());
        assert!(!svc.delete_appointment(created.id).await.unwrap());
        // missing id was never there; same observable end state
        assert!(!svc.delete_appointment(created.id + 7).await.unwrap());
        let err = svc.get_appointment(created.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::AppointmentNotFound(_)));
    }

    #[tokio::test]
    async fn bulk_delete_by_date_counts_rows() {
        let (svc, user) = service_with_user().await;
        svc.create_appointment(valid_input(), user).await.unwrap();
        svc.create_appointment(valid_input(), user).await.unwrap();
        let mut other = valid_input();
        other.from_date = NaiveDate::from_ymd_opt(2024, 5, 2);
        svc.create_appointment(other, user).await.unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(svc.delete_user_appointments_by_date(user, day).await.unwrap(), 2);
        assert_eq!(svc.delete_user_appointments_by_date(user, day).await.unwrap(), 0);
        assert_eq!(svc.list_user_appointments(user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn foreign_appointments_are_hidden_from_other_users() {
        let accounts = Arc::new(MockAccountRepository::default());
        let owner = accounts.create("eliza", "$hash$", PASSWORD_ALGORITHM).await.unwrap();
        let intruder = accounts.create("admin", "$hash$", PASSWORD_ALGORITHM).await.unwrap();
        let svc = AppointmentService::new(accounts, Arc::new(MockAppointmentRepository::default()));

        let created = svc.create_appointment(valid_input(), owner.id).await.unwrap();

        let err = svc.get_appointment_for_user(intruder.id, created.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::AppointmentNotFound(_)));

        let err = svc
            .update_notes_for_user(intruder.id, created.id, Some("mine now".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AppointmentNotFound(_)));

        assert!(!svc.delete_appointment_for_user(intruder.id, created.id).await.unwrap());

        // the owner still sees the record untouched
        let still_there = svc.get_appointment_for_user(owner.id, created.id).await.unwrap();
        assert_eq!(still_there.notes, None);
        assert!(svc.delete_appointment_for_user(owner.id, created.id).await.unwrap());
    }
}
