use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid author id: {0}")]
    InvalidReference(i64),

    #[error("post not found: {0}")]
    NotFound(i64),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Machine-readable code carried by `ErrorResponse::status`.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidReference(_) => "INVALID_REFERENCE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::SqlxError(_) | AppError::MigrationError(_) | AppError::InternalError(_) => {
                "INTERNAL_ERROR"
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_variant() {
        assert_eq!(AppError::InvalidReference(4).code(), "INVALID_REFERENCE");
        assert_eq!(AppError::NotFound(4).code(), "NOT_FOUND");
        assert_eq!(
            AppError::ValidationError("bad".into()).code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::InternalError("boom".into()).code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn messages_name_the_missing_reference() {
        assert_eq!(
            AppError::InvalidReference(7).to_string(),
            "invalid author id: 7"
        );
        assert_eq!(AppError::NotFound(9).to_string(), "post not found: 9");
    }
}
