use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum LibraryError {
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LibraryError::NotFound { .. })
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<reqwest::Error> for LibraryError {
    fn from(err: reqwest::Error) -> Self {
        LibraryError::runtime(
            format!("http client {:?}", err).as_str(), err.status().map(|s| s.as_u16().to_string()))
    }
}

impl From<tokio::task::JoinError> for LibraryError {
    fn from(err: tokio::task::JoinError) -> Self {
        let reason = if err.is_cancelled() { "cancelled" } else { "panicked" };
        LibraryError::runtime(
            format!("background task failed {:?}", err).as_str(), Some(reason.to_string()))
    }
}

impl From<uuid::Error> for LibraryError {
    fn from(err: uuid::Error) -> Self {
        LibraryError::validation(
            format!("malformed identifier {}", err).as_str(), Some("uuid".to_string()))
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for the books service.
pub type LibraryResult<T> = Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_create_duplicate_key_error() {
        assert!(matches!(LibraryError::duplicate_key("test"), LibraryError::DuplicateKey{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_not_found_error() {
        let err = LibraryError::not_found("test");
        assert!(matches!(err, LibraryError::NotFound{ message: _ }));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_should_create_validation_error() {
        let err = LibraryError::validation("test", None);
        assert!(matches!(err, LibraryError::Validation{ message: _, reason_code: _ }));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_should_create_serialization_error() {
        assert!(matches!(LibraryError::serialization("test"), LibraryError::Serialization{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_runtime_error() {
        assert!(matches!(LibraryError::runtime("test", None), LibraryError::Runtime{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_convert_malformed_uuid() {
        let err = LibraryError::from(Uuid::parse_str("not-a-uuid").expect_err("should not parse"));
        assert!(matches!(err, LibraryError::Validation{ message: _, reason_code: Some(_) }));
    }

    #[tokio::test]
    async fn test_should_convert_panicked_task() {
        let err = tokio::spawn(async { panic!("boom") }).await.expect_err("should panic");
        let err = LibraryError::from(err);
        match err {
            LibraryError::Runtime { reason_code, .. } => assert_eq!(Some("panicked".to_string()), reason_code),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_should_format_errors() {
        assert_eq!("missing", LibraryError::not_found("missing").to_string());
        assert_eq!("bad None", LibraryError::validation("bad", None).to_string());
    }
}
