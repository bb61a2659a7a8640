//! Error types for sounder.
//!
//! Uses `thiserror` for ergonomic error definitions. Only pre-flight
//! conditions are errors at the session level; per-probe failures (timeout,
//! refusal, unreachable) are classified outcomes, never `Err` values.

use thiserror::Error;

/// Errors that abort a scan session before any probe is issued.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("no target specified")]
    EmptyTarget,

    #[error("invalid target: {0:?}")]
    InvalidTarget(String),

    #[error("failed to resolve '{host}': {reason}")]
    Resolution { host: String, reason: String },

    #[error("no IP addresses found for '{0}'")]
    NoAddresses(String),
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors from report persistence.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("scan not found: {0}")]
    ScanNotFound(String),

    #[error("ambiguous scan ID prefix {prefix:?}: {matches} matches")]
    AmbiguousPrefix { prefix: String, matches: usize },

    #[error("failed to save report: {0}")]
    SaveFailed(String),

    #[error("failed to load report: {0}")]
    LoadFailed(String),

    #[error("storage directory error: {0}")]
    Directory(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors from configuration and path handling.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine a home directory for this platform")]
    DirectoryNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level error for CLI command execution.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Port(#[from] crate::types::PortError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
