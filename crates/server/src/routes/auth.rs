use std::sync::Arc;

use axum::{extract::State, Json};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use service::appointment::repo::seaorm::SeaOrmAppointmentRepository;
use service::appointment::AppointmentService;
use service::auth::domain::LoginInput;
use service::auth::repo::seaorm::SeaOrmAccountRepository;
use service::auth::AuthService;

use crate::errors::ApiError;

/// Shared handler state: the database handle plus the two business services
/// wired to their SeaORM repositories.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthService<SeaOrmAccountRepository>>,
    pub appointments: Arc<AppointmentService<SeaOrmAccountRepository, SeaOrmAppointmentRepository>>,
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub user_id: i64,
    pub username: String,
    pub message: String,
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Logged in"), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<ServerState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<LoginOutput>, ApiError> {
    let account = state
        .auth
        .authenticate(&input.username, &input.password)
        .await
        .map_err(ApiError::for_login)?;
    Ok(Json(LoginOutput {
        user_id: account.id,
        username: account.username,
        message: "Login successful".into(),
    }))
}
