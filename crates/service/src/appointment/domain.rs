use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Creation payload as supplied by the caller. Required string fields
/// default to empty when absent so the service can report which one is
/// missing; `from_date` stays an `Option` for the same reason.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAppointment {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub from_date: Option<NaiveDate>,
    #[serde(default)]
    pub from_time: Option<String>,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Validated creation input, ownership already bound server-side.
#[derive(Debug, Clone)]
pub struct CreateAppointment {
    pub user_id: i64,
    pub name: String,
    pub description: String,
    pub from_date: NaiveDate,
    pub from_time: Option<String>,
    pub genre: String,
    pub notes: Option<String>,
}

/// Stored appointment (business view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: String,
    pub from_date: NaiveDate,
    pub from_time: Option<String>,
    pub genre: String,
    pub notes: Option<String>,
}
