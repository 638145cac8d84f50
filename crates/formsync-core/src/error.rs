//! Error types for FormSync

use thiserror::Error;

use crate::FieldPath;

/// Core FormSync errors
#[derive(Error, Debug)]
pub enum FormSyncError {
    // Configuration errors
    #[error("Invalid sync configuration: {0}")]
    InvalidConfig(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    // Field errors
    #[error("Unknown field: {0}")]
    UnknownField(FieldPath),

    // Validation dispatch errors
    #[error("Validator failed: {0}")]
    ValidatorFailed(String),

    #[error("No async runtime available to dispatch validation")]
    NoRuntime,

    #[error("Validation task aborted: {0}")]
    TaskAborted(String),
}

/// Result type for FormSync operations
pub type FormSyncResult<T> = Result<T, FormSyncError>;
