pub mod geo;
pub mod location;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
