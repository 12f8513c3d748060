use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadingError {
    /// Required field missing or of the wrong shape
    Field(String),
    /// `next_checkin` could not be interpreted as a UTC timestamp
    Timestamp(String),
    /// `offline` flag is not an integer
    Flag(String),
    /// Probe temperature is neither a sentinel nor a number
    Probe(String),
}

impl fmt::Display for ReadingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(e) => write!(f, "Invalid sensor field: {}", e),
            Self::Timestamp(e) => write!(f, "Invalid next checkin: {}", e),
            Self::Flag(e) => write!(f, "Invalid offline flag: {}", e),
            Self::Probe(e) => write!(f, "Invalid probe temperature: {}", e),
        }
    }
}

impl std::error::Error for ReadingError {}

pub type Result<T> = core::result::Result<T, ReadingError>;
