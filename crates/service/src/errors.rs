use thiserror::Error;

/// Classified failures shared by the auth and appointment services.
///
/// Infrastructure faults get their own `Repository` kind so a backend outage
/// is never reported as a credential problem.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("user not found: {0}")]
    UserNotFound(String),
    #[error("invalid appointment data: {0}")]
    InvalidAppointmentData(String),
    #[error("appointment not found: {0}")]
    AppointmentNotFound(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl ServiceError {
    /// Stable code for external mapping/logging
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::InvalidCredentials(_) => "INVALID_CREDENTIALS",
            ServiceError::UserNotFound(_) => "USER_NOT_FOUND",
            ServiceError::InvalidAppointmentData(_) => "INVALID_APPOINTMENT_DATA",
            ServiceError::AppointmentNotFound(_) => "APPOINTMENT_NOT_FOUND",
            ServiceError::Repository(_) => "REPOSITORY_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceError;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ServiceError::InvalidCredentials("x".into()).code(), "INVALID_CREDENTIALS");
        assert_eq!(ServiceError::UserNotFound("x".into()).code(), "USER_NOT_FOUND");
        assert_eq!(ServiceError::InvalidAppointmentData("x".into()).code(), "INVALID_APPOINTMENT_DATA");
        assert_eq!(ServiceError::AppointmentNotFound("x".into()).code(), "APPOINTMENT_NOT_FOUND");
        assert_eq!(ServiceError::Repository("x".into()).code(), "REPOSITORY_ERROR");
    }

    #[test]
    fn display_carries_the_message() {
        let e = ServiceError::InvalidAppointmentData("name is required".into());
        assert_eq!(e.to_string(), "invalid appointment data: name is required");
    }
}
