use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use service::appointment::domain::{Appointment, NewAppointment};

use super::auth::ServerState;
use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct OwnerParam {
    #[serde(rename = "userId")]
    pub user_id: i64,
}

#[derive(Debug, Deserialize, Default)]
pub struct OptionalOwnerParam {
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    #[serde(default)]
    pub ordered: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNotesRequest {
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct DeleteOutput {
    pub message: String,
    pub removed: u64,
}

fn invalid_date(raw: &str) -> ApiError {
    ApiError::new(
        StatusCode::BAD_REQUEST,
        "INVALID_APPOINTMENT_DATA",
        format!("invalid date format: {raw} (expected yyyy-mm-dd)"),
    )
}

fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    raw.parse::<NaiveDate>().map_err(|_| invalid_date(raw))
}

#[utoipa::path(post, path = "/api/appointments", tag = "appointments",
    request_body = crate::openapi::NewAppointmentRequest,
    params(("userId" = i64, Query, description = "Owning user id")),
    responses((status = 201, description = "Created"), (status = 400, description = "Invalid appointment data"), (status = 404, description = "User not found")))]
pub async fn create(
    State(state): State<ServerState>,
    Query(owner): Query<OwnerParam>,
    Json(input): Json<NewAppointment>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let created = state.appointments.create_appointment(input, owner.user_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/appointments/user/{user_id}", tag = "appointments",
    params(
        ("user_id" = i64, Path, description = "Owning user id"),
        ("ordered" = Option<bool>, Query, description = "Sort by date then time ascending")
    ),
    responses((status = 200, description = "Appointments for the user"), (status = 404, description = "User not found")))]
pub async fn list_for_user(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let list = if params.ordered {
        state.appointments.list_user_appointments_ordered(user_id).await?
    } else {
        state.appointments.list_user_appointments(user_id).await?
    };
    Ok(Json(list))
}

#[utoipa::path(get, path = "/api/appointments/user/{user_id}/date/{date}", tag = "appointments",
    params(
        ("user_id" = i64, Path, description = "Owning user id"),
        ("date" = String, Path, description = "Calendar date, yyyy-mm-dd")
    ),
    responses((status = 200, description = "Appointments on the date"), (status = 400, description = "Bad date"), (status = 404, description = "User not found")))]
pub async fn list_for_user_by_date(
    State(state): State<ServerState>,
    Path((user_id, date)): Path<(i64, String)>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let date = parse_date(&date)?;
    let list = state.appointments.list_user_appointments_by_date(user_id, date).await?;
    Ok(Json(list))
}

#[utoipa::path(delete, path = "/api/appointments/user/{user_id}/date/{date}", tag = "appointments",
    params(
        ("user_id" = i64, Path, description = "Owning user id"),
        ("date" = String, Path, description = "Calendar date, yyyy-mm-dd")
    ),
    responses((status = 200, description = "Appointments removed"), (status = 400, description = "Bad date"), (status = 404, description = "User not found")))]
pub async fn delete_for_user_by_date(
    State(state): State<ServerState>,
    Path((user_id, date)): Path<(i64, String)>,
) -> Result<Json<DeleteOutput>, ApiError> {
    let date = parse_date(&date)?;
    let removed = state.appointments.delete_user_appointments_by_date(user_id, date).await?;
    Ok(Json(DeleteOutput { message: "Appointments deleted successfully".into(), removed }))
}

#[utoipa::path(get, path = "/api/appointments/{id}", tag = "appointments",
    params(("id" = i64, Path, description = "Appointment id")),
    responses((status = 200, description = "Appointment"), (status = 404, description = "Not found")))]
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Appointment>, ApiError> {
    let appointment = state.appointments.get_appointment(id).await?;
    Ok(Json(appointment))
}

#[utoipa::path(put, path = "/api/appointments/{id}/notes", tag = "appointments",
    request_body = crate::openapi::UpdateNotesDoc,
    params(
        ("id" = i64, Path, description = "Appointment id"),
        ("userId" = Option<i64>, Query, description = "Restrict to this owner")
    ),
    responses((status = 200, description = "Updated"), (status = 404, description = "Not found")))]
pub async fn update_notes(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(owner): Query<OptionalOwnerParam>,
    Json(body): Json<UpdateNotesRequest>,
) -> Result<Json<Appointment>, ApiError> {
    let updated = match owner.user_id {
        Some(user_id) => state.appointments.update_notes_for_user(user_id, id, body.notes).await?,
        None => state.appointments.update_notes(id, body.notes).await?,
    };
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/api/appointments/{id}", tag = "appointments",
    params(
        ("id" = i64, Path, description = "Appointment id"),
        ("userId" = Option<i64>, Query, description = "Restrict to this owner")
    ),
    responses((status = 200, description = "Deleted (idempotent)")))]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(owner): Query<OptionalOwnerParam>,
) -> Result<Json<DeleteOutput>, ApiError> {
    let removed = match owner.user_id {
        Some(user_id) => state.appointments.delete_appointment_for_user(user_id, id).await?,
        None => state.appointments.delete_appointment(id).await?,
    };
    Ok(Json(DeleteOutput {
        message: "Appointment deleted successfully".into(),
        removed: u64::from(removed),
    }))
}
