use thiserror::Error;

/// Application-wide error types for the attendance service.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request input was rejected before reaching the database.
    #[error("{0}")]
    Validation(String),

    /// The requested record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Environment configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Short machine-readable name for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::DatabaseError(_) => "database_error",
            AppError::ConfigError(_) => "config_error",
        }
    }

    /// Returns true if the caller is at fault and the message is safe to show them.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::NotFound(_))
    }

    /// Error reported when a required create field is null or absent.
    pub fn missing_field(field: &str) -> Self {
        AppError::Validation(format!("Missing '{field}' in request body"))
    }

    /// Error reported when a student id does not resolve to a record.
    pub fn student_not_found() -> Self {
        AppError::NotFound("Student doesn't exist".into())
    }
}
