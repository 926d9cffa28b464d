//! Error types for Isograph operations.
//!
//! This module provides the main error type [`IsographError`]. The routing
//! core itself has no failure paths; errors come from the layers around it:
//! reading and parsing scene files, validating names and configuration, and
//! exporting.

use std::{io, ops::Range};

use thiserror::Error;

/// The main error type for Isograph operations.
#[derive(Debug, Error)]
pub enum IsographError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A scene description could not be parsed.
    ///
    /// `span` is the byte range in `src` the parser blamed, when known.
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Unknown element `{0}`")]
    UnknownElement(String),

    #[error("Duplicate element `{0}`")]
    DuplicateElement(String),

    #[error("Invalid element: {0}")]
    InvalidElement(String),

    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl From<crate::export::Error> for IsographError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(error.to_string())
    }
}

impl IsographError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(
        message: impl Into<String>,
        span: Option<Range<usize>>,
        src: impl Into<String>,
    ) -> Self {
        Self::Parse {
            message: message.into(),
            span,
            src: src.into(),
        }
    }
}
