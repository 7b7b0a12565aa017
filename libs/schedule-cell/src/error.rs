use thiserror::Error;

use sequence_cell::SequenceError;
use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Code generation failed: {0}")]
    SequenceError(#[from] SequenceError),

    #[error("Schedule storage error: {0}")]
    StorageError(String),

    #[error("Dentist directory unavailable: {0}")]
    DirectoryError(String),
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::ValidationError(msg) => AppError::ValidationError(msg),
            ScheduleError::SequenceError(inner) => inner.into(),
            ScheduleError::StorageError(_) => {
                AppError::Database("Schedule store unavailable".to_string())
            }
            ScheduleError::DirectoryError(_) => {
                AppError::ExternalService("Dentist directory unavailable".to_string())
            }
        }
    }
}
