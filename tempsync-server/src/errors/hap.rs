use axum::http::StatusCode;

/// Failure returned by a characteristic read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HapStatus {
    #[error("Resource does not exist")]
    ResourceDoesNotExist,

    #[error("Service communication failure")]
    ServiceCommunicationFailure,
}

impl HapStatus {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HapStatus::ResourceDoesNotExist => StatusCode::NOT_FOUND,
            HapStatus::ServiceCommunicationFailure => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Numeric status understood by home automation clients.
    pub fn code(&self) -> i32 {
        match self {
            HapStatus::ResourceDoesNotExist => -70409,
            HapStatus::ServiceCommunicationFailure => -70402,
        }
    }
}
