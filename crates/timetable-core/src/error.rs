use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("Failed to parse JSON events: {0}")]
    Parse(String),

    #[error("Failed to extract groups: {0}")]
    Extraction(String),

    #[error("Failed to parse calendar data: {0}")]
    Calendar(String),
}

impl From<serde_json::Error> for TimetableError {
    fn from(err: serde_json::Error) -> Self {
        TimetableError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TimetableError>;
