use utoipa::{OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct NewAppointmentRequest {
    pub name: String,
    pub description: String,
    pub from_date: String,
    pub from_time: Option<String>,
    pub genre: String,
    pub notes: Option<String>,
}

#[derive(ToSchema)]
pub struct UpdateNotesDoc { pub notes: Option<String> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::appointments::create,
        crate::routes::appointments::list_for_user,
        crate::routes::appointments::list_for_user_by_date,
        crate::routes::appointments::delete_for_user_by_date,
        crate::routes::appointments::get_by_id,
        crate::routes::appointments::update_notes,
        crate::routes::appointments::delete,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            NewAppointmentRequest,
            UpdateNotesDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "appointments")
    )
)]
pub struct ApiDoc;
