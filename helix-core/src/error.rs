//! Error types for Helix core

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced when reading TimeSpan text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeSpanParseError {
    /// Input was empty or whitespace
    #[error("empty duration")]
    Empty,

    /// Negative durations cannot be represented
    #[error("negative duration \"{0}\"")]
    Negative(String),

    /// Input does not follow the [d.]hh:mm[:ss[.fffffff]] layout
    #[error("invalid duration format \"{0}\"")]
    InvalidFormat(String),

    /// A component is outside its allowed range
    #[error("{component} value {value} is out of range")]
    OutOfRange {
        /// Which component (hours, minutes, seconds)
        component: &'static str,
        /// The offending value
        value: u64,
    },

    /// Duration too large to represent
    #[error("duration \"{0}\" overflows")]
    Overflow(String),
}

/// Errors produced when loading a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest file could not be read
    #[error("failed to read manifest {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest file is not valid JSON or has the wrong shape
    #[error("failed to parse manifest {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
