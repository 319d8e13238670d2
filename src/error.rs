//! Error types for rate_gap

use thiserror::Error;

/// Main error type for rate_gap
#[derive(Error, Debug)]
pub enum RateGapError {
    #[error("No published rate available")]
    NoPublishedRate,

    #[error("Incomplete input: {0}")]
    IncompleteInput(String),

    #[error("Stored history is corrupt: {0}")]
    PersistenceCorrupt(String),

    #[error("Published rate unavailable: {0}")]
    RateUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[cfg(feature = "rusqlite-support")]
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
}

/// Result type alias for rate_gap operations
pub type Result<T> = std::result::Result<T, RateGapError>;
