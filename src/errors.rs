//! Error types for sheet rendering
//!
//! Defines the top-level error hierarchy. Record lookup failures live in
//! [`crate::record::RecordError`] and convert into [`SheetError`] with `?`.

use crate::record::RecordError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level rendering error type
#[derive(Debug, Error)]
pub enum SheetError {
    /// Input tree is empty or not well-formed; raised before any derivation
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A required field is absent or has the wrong shape
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Reading the input tree or writing the result failed
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Render configuration could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The external page-merge step rejected the overlay
    #[error("Page merge failed: {0}")]
    Merge(String),
}

pub type SheetResult<T> = std::result::Result<T, SheetError>;
