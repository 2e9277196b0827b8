//! Error types for the dining API.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for snapshot source operations
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Errors raised while fetching a snapshot from the upstream source.
///
/// These never escape a refresh cycle; the scheduler reports them and keeps
/// serving the previous snapshot.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Reading a local snapshot document failed
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Upstream request failed or returned a non-success status
    #[cfg(feature = "http-source")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The document was not a list of locations
    #[error("Invalid location document: {0}")]
    Decode(#[from] serde_json::Error),

    /// The source panicked mid-fetch
    #[error("Snapshot source panicked: {0}")]
    Panicked(String),
}

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors raised by query parameter handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
