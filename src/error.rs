//! Error types for the logger

use std::io;
use std::path::PathBuf;

/// Result type for logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a logger or writing a record
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The resolved configuration is unusable (no sink enabled, bad limits)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A segment file or its directory could not be opened or created
    #[error("Failed to open log segment at {path}: {source}")]
    SegmentOpen {
        /// The segment path that failed to open
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// The active segment's file name carries no `-<N>.<ext>` sequence suffix
    #[error("Malformed segment name {name:?}: no sequence suffix")]
    MalformedSegmentName {
        /// The offending file name
        name: String,
    },

    /// Writing to an open segment failed
    #[error("Failed to write log segment {path}: {source}")]
    Write {
        /// The segment being written
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Writing to the terminal sink failed
    #[error("Failed to write to terminal: {0}")]
    Terminal(#[source] io::Error),

    /// An options file could not be read
    #[error("Failed to read options file {path}: {source}")]
    ReadOptions {
        /// The options file path
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// An options file is not valid TOML for [`crate::LoggerOptions`]
    #[error("Failed to parse options: {0}")]
    ParseOptions(#[from] toml::de::Error),
}
