use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::errors::ServiceError;

/// JSON error response: `{"message": ..., "errorCode": ...}` with a status
/// derived from the classified failure kind.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self { status, code, message: message.into() }
    }

    /// Login path: both bad credentials and an unknown username come back
    /// as 401 so the endpoint never confirms whether a username exists.
    pub fn for_login(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidCredentials(_) | ServiceError::UserNotFound(_) => {
                let code = err.code();
                Self::new(StatusCode::UNAUTHORIZED, code, err.to_string())
            }
            other => other.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            ServiceError::UserNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidAppointmentData(_) => StatusCode::BAD_REQUEST,
            ServiceError::AppointmentNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.code(), err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(code = self.code, message = %self.message, "request failed");
        }
        (
            self.status,
            Json(serde_json::json!({"message": self.message, "errorCode": self.code})),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_expected_statuses() {
        let cases = [
            (ServiceError::InvalidCredentials("x".into()), StatusCode::UNAUTHORIZED),
            (ServiceError::UserNotFound("x".into()), StatusCode::NOT_FOUND),
            (ServiceError::InvalidAppointmentData("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::AppointmentNotFound("x".into()), StatusCode::NOT_FOUND),
            (ServiceError::Repository("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status, status, "{}", api.code);
        }
    }

    #[test]
    fn login_mapping_hides_user_existence() {
        let api = ApiError::for_login(ServiceError::UserNotFound("user not found: x".into()));
        assert_eq!(api.status, StatusCode::UNAUTHORIZED);
        assert_eq!(api.code, "USER_NOT_FOUND");

        // infrastructure faults stay 500 even on the login path
        let api = ApiError::for_login(ServiceError::Repository("db down".into()));
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
