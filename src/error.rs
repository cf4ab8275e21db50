//! Journal error types

use thiserror::Error;

/// Errors raised by the journal store and its persistence layer.
///
/// The analytics, search and label functions are total and never produce these.
#[derive(Error, Debug)]
pub enum JournalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Dream not found: {0}")]
    NotFound(String),

    #[error("Dream id already exists: {0}")]
    DuplicateId(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl From<serde_json::Error> for JournalError {
    fn from(err: serde_json::Error) -> Self {
        JournalError::Serialization(err.to_string())
    }
}

pub type JournalResult<T> = Result<T, JournalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = JournalError::NotFound("d-42".to_string());
        assert_eq!(err.to_string(), "Dream not found: d-42");

        let err = JournalError::DuplicateId("d-1".to_string());
        assert_eq!(err.to_string(), "Dream id already exists: d-1");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: JournalError = json_err.into();
        assert!(matches!(err, JournalError::Serialization(_)));
    }
}
