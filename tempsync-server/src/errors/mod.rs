pub mod api;
pub mod hap;
pub mod storage;

pub use api::ApiError;
pub use hap::HapStatus;
pub use storage::StorageError;

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub const DEFAULT_ISSUE_TRACKER: &str = "https://github.com/gorhack/tempstick/issues";

/// Formats failures that are logged and swallowed so users can report them.
#[derive(Debug, Clone)]
pub struct ErrorReporter {
    issue_tracker: String,
}

impl ErrorReporter {
    pub fn new(issue_tracker: impl Into<String>) -> Self {
        Self {
            issue_tracker: issue_tracker.into(),
        }
    }

    pub fn format_error_message(&self, message: &str, context: Option<&str>) -> String {
        let context = context.map(|c| format!("{c} ")).unwrap_or_default();

        format!(
            "{context}Report the following response in our issue tracker: {}\n{message}",
            self.issue_tracker
        )
    }

    /// `prefix` names what was being requested when the call failed.
    pub fn api_error(&self, error: &ApiError, prefix: Option<&str>) -> String {
        let context = match prefix {
            Some(prefix) => format!("{prefix} {}", error.context()),
            None => error.context().to_string(),
        };

        self.format_error_message(&error.to_string(), Some(&context))
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new(DEFAULT_ISSUE_TRACKER)
    }
}

impl IntoResponse for HapStatus {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = Json(json!({
            "error": {
                "code": status.as_u16(),
                "message": self.to_string(),
                "status": self.code(),
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn test_format_error_message() {
        let reporter = ErrorReporter::new("https://example.com/issues");

        assert_eq!(
            reporter.format_error_message("boom", Some("Error requesting accessory.")),
            "Error requesting accessory. Report the following response in our issue tracker: https://example.com/issues\nboom"
        );
        assert_eq!(
            reporter.format_error_message("boom", None),
            "Report the following response in our issue tracker: https://example.com/issues\nboom"
        );
    }

    #[test]
    fn test_api_error_message() {
        let reporter = ErrorReporter::new("https://example.com/issues");
        let error = ApiError::Application("{}".into());

        assert_eq!(
            reporter.api_error(&error, Some("Error requesting accessory Garage.")),
            format!(
                "Error requesting accessory Garage. {} Report the following response in our issue tracker: https://example.com/issues\n{}",
                error.context(),
                error
            )
        );
        assert!(reporter.api_error(&error, None).starts_with(error.context()));
    }

    #[test]
    fn test_hap_status_response_code() {
        assert_eq!(
            HapStatus::ResourceDoesNotExist.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            HapStatus::ServiceCommunicationFailure.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
