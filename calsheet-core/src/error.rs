//! Error types for calsheet.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur in calsheet operations.
#[derive(Error, Debug)]
pub enum CalsheetError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider '{0}' not found in PATH")]
    ProviderNotInstalled(String),

    #[error("Provider request timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("Spreadsheet error: {0}")]
    Sheet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A user-correctable problem in the uploaded spreadsheet.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl From<csv::Error> for CalsheetError {
    fn from(e: csv::Error) -> Self {
        CalsheetError::Sheet(e.to_string())
    }
}

/// Result type alias for calsheet operations.
pub type CalsheetResult<T> = Result<T, CalsheetError>;
