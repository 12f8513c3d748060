use tempsync_api::ReadingError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Received a bad response code {status} (not '200'): {body}")]
    BadStatus { status: u16, body: String },

    #[error("Received an unsuccessful response (not 'success'): {0}")]
    Application(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<ReadingError> for ApiError {
    fn from(e: ReadingError) -> Self {
        ApiError::Parse(e.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

impl ApiError {
    /// Context line prepended to the issue tracker pointer when logged.
    pub fn context(&self) -> &'static str {
        match self {
            ApiError::Transport(_) => "Unable to reach the TempStick API.",
            ApiError::BadStatus { .. } => {
                "Received a bad response code resulting in the inability to request your device(s). Check the API at https://tempstickapi.com/docs/"
            }
            ApiError::Application(_) => {
                "Received an unsuccessful response resulting in the inability to request your device(s)."
            }
            ApiError::Parse(_) => "Unable to interpret the sensor returned by the TempStick API.",
        }
    }
}
