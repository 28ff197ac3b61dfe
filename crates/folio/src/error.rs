//! Error types for Folio operations.
//!
//! This module provides the main error type [`FolioError`] which wraps
//! the error conditions that can occur while processing identifiers.

use std::io;

use thiserror::Error;

use folio_core::pages::PageRangeError;
use folio_parser::error::IdentifierError;

/// The main error type for Folio operations.
///
/// # Diagnostic Variants
///
/// The `Identifier` variant keeps the identifier text next to the error so
/// its span can be rendered against the source.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Identifier { err: IdentifierError, src: String },

    #[error("no pages to normalize")]
    EmptyPageSet,

    #[error("`{identifier}` does not refer to pages")]
    NoPages { identifier: String },

    #[error("invalid page range: {0}")]
    PageRange(PageRangeError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<PageRangeError> for FolioError {
    fn from(err: PageRangeError) -> Self {
        match err {
            PageRangeError::Empty => Self::EmptyPageSet,
            err => Self::PageRange(err),
        }
    }
}

impl FolioError {
    /// Create a new `Identifier` error with the associated source text.
    pub fn new_identifier_error(err: IdentifierError, src: impl Into<String>) -> Self {
        Self::Identifier {
            err,
            src: src.into(),
        }
    }
}
