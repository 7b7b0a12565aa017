use thiserror::Error;

use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum OtpError {
    #[error("Invalid contact number: {0}")]
    InvalidContact(String),

    #[error("Could not allocate a unique code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },

    #[error("Redis connection error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("OTP storage error: {0}")]
    StorageError(String),
}

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("SMS gateway request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("SMS gateway rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

impl From<OtpError> for AppError {
    fn from(err: OtpError) -> Self {
        match err {
            OtpError::InvalidContact(_) => AppError::ValidationError(err.to_string()),
            OtpError::CodeSpaceExhausted { .. } => AppError::Conflict(err.to_string()),
            OtpError::RedisError(_) | OtpError::StorageError(_) => {
                AppError::Database("Verification store unavailable".to_string())
            }
        }
    }
}
