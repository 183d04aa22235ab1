use axum::{
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

pub mod appointments;
pub mod auth;

use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, auth, appointment CRUD, and
/// the swagger UI.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let api = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/appointments", post(appointments::create))
        .route(
            "/api/appointments/:id",
            get(appointments::get_by_id).delete(appointments::delete),
        )
        .route("/api/appointments/:id/notes", put(appointments::update_notes))
        .route("/api/appointments/user/:user_id", get(appointments::list_for_user))
        .route(
            "/api/appointments/user/:user_id/date/:date",
            get(appointments::list_for_user_by_date).delete(appointments::delete_for_user_by_date),
        )
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and friends get logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
