use shared::models::ValidationError;
use thiserror::Error;

use crate::media::camera::CameraError;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Stored data is not valid JSON: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("CSV export error: {source}")]
    CsvError {
        #[from]
        source: csv::Error,
    },

    #[error("PDF export error: {0}")]
    PdfError(String),

    #[error("Validation error: {source}")]
    Validation {
        #[from]
        source: ValidationError,
    },

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Confirmation phrase does not match; type \"{expected}\" to confirm")]
    ConfirmationMismatch { expected: &'static str },

    #[error("Nothing to export: the collection is empty")]
    EmptyExport,

    #[error("Attachment rejected: {0}")]
    AttachmentError(String),

    #[error(transparent)]
    Camera(#[from] CameraError),
}

impl EngineError {
    /// True for errors caused by operator input rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            EngineError::Validation { .. }
                | EngineError::NotFound(_)
                | EngineError::ConfirmationMismatch { .. }
                | EngineError::EmptyExport
                | EngineError::AttachmentError(_)
        )
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
