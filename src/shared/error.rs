use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Database(String),
    Network(String),
    Storage(String),
    Auth(String),
    Unauthorized(String),
    NotFound(String),
    InvalidInput(String),
    ValidationError(String),
    ConfigurationError(String),
    SerializationError(String),
    DeserializationError(String),
    Internal(String),
}

/// Retry classification used by the retry queue manager. Client-side
/// rejections are terminal; everything else is eligible for backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Transient,
    Fatal,
}

impl AppError {
    pub fn classify(&self) -> ErrorClass {
        match self {
            AppError::Auth(_)
            | AppError::Unauthorized(_)
            | AppError::NotFound(_)
            | AppError::InvalidInput(_)
            | AppError::ValidationError(_) => ErrorClass::Fatal,
            _ => ErrorClass::Transient,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.classify() == ErrorClass::Fatal
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Auth(msg) => write!(f, "Auth error: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            AppError::DeserializationError(msg) => write!(f, "Deserialization error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Internal(err)
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        AppError::Internal(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_rejections_are_fatal() {
        assert!(AppError::Unauthorized("403".into()).is_fatal());
        assert!(AppError::Auth("401".into()).is_fatal());
        assert!(AppError::NotFound("404".into()).is_fatal());
        assert!(AppError::InvalidInput("400".into()).is_fatal());
        assert!(AppError::ValidationError("bad shape".into()).is_fatal());
    }

    #[test]
    fn network_and_storage_errors_are_transient() {
        assert_eq!(
            AppError::Network("timed out".into()).classify(),
            ErrorClass::Transient
        );
        assert_eq!(
            AppError::Database("locked".into()).classify(),
            ErrorClass::Transient
        );
        assert_eq!(
            AppError::Internal("unexpected".into()).classify(),
            ErrorClass::Transient
        );
    }
}
