use thiserror::Error;

use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum SequenceError {
    #[error("Invalid counter scope '{0}': use 1-32 lowercase letters, digits, '_' or '-'")]
    InvalidScope(String),

    #[error("No code prefix registered for scope '{0}'")]
    UnknownScope(String),

    #[error("Redis connection error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Counter storage error: {0}")]
    StorageError(String),
}

impl From<SequenceError> for AppError {
    fn from(err: SequenceError) -> Self {
        match err {
            SequenceError::InvalidScope(_) => AppError::ValidationError(err.to_string()),
            SequenceError::UnknownScope(_) => AppError::NotFound(err.to_string()),
            SequenceError::RedisError(_) | SequenceError::StorageError(_) => {
                AppError::Database("Sequence counter unavailable".to_string())
            }
        }
    }
}
