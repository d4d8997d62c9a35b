use std::path::PathBuf;
use thiserror::Error;

/// Result type for ctcurate operations
pub type Result<T> = std::result::Result<T, CurateError>;

/// Error types for ctcurate operations
#[derive(Error, Debug)]
pub enum CurateError {
    /// DICOM reading/writing error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// Invalid tag value
    #[error("Invalid tag value: {0}")]
    InvalidValue(String),

    /// Anonymization could not be completed for a file.
    ///
    /// Always fatal: a partially scrubbed file must never reach durable
    /// storage.
    #[error("anonymization failed for {path}: {message}")]
    Anonymization { path: PathBuf, message: String },

    /// A referenced DataSource/SeriesInstanceUID pair is not registered
    /// on disk or in its source metadata table.
    #[error("integrity violation: {0}")]
    Integrity(String),

    /// Invalid configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// CSV parsing/writing error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for CurateError {
    fn from(e: dicom_object::ReadError) -> Self {
        CurateError::DicomError(format!("{}", e))
    }
}

impl From<dicom_object::WriteError> for CurateError {
    fn from(e: dicom_object::WriteError) -> Self {
        CurateError::DicomError(format!("{}", e))
    }
}

impl From<dicom_core::value::ConvertValueError> for CurateError {
    fn from(e: dicom_core::value::ConvertValueError) -> Self {
        CurateError::InvalidValue(format!("{}", e))
    }
}
