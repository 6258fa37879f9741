//! Error types
//!
//! Malformed terminal data is never an error; these cover invalid
//! configuration and unreadable recording containers.

use std::io;
use thiserror::Error;

/// Crate error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON error in a config file or recording
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Screen constructed with a zero dimension
    #[error("Invalid screen dimensions: {rows} rows x {cols} cols")]
    InvalidDimensions { rows: usize, cols: usize },

    /// Recording has no header line
    #[error("Empty recording")]
    EmptyRecording,

    /// Recording header has a version other than 2
    #[error("Unsupported asciicast version: {0} (expected 2)")]
    UnsupportedVersion(u64),

    /// Recording header is not a usable JSON object
    #[error("Invalid recording header: {0}")]
    InvalidHeader(String),
}

/// Result type for this crate
pub type Result<T> = std::result::Result<T, Error>;
