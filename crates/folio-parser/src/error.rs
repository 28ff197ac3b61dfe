//! Error and diagnostic system for Folio identifiers.
//!
//! Failures are typed per phase ([`LexError`], [`SyntaxError`],
//! [`ValidationError`]) and wrapped in [`IdentifierError`]. For reporting,
//! each error converts into a [`Diagnostic`] with an [`ErrorCode`], labeled
//! spans and optional help text.
//!
//! # Example
//!
//! ```
//! # use folio_parser::error::{Diagnostic, ErrorCode};
//! # use folio_parser::Span;
//! let diag = Diagnostic::error("part `P1` is stated more than once")
//!     .with_code(ErrorCode::E202)
//!     .with_label(Span::new(13..15), "stated again here")
//!     .with_secondary_label(Span::new(6..8), "first stated here");
//! ```

mod diagnostic;
mod error_code;
mod identifier_error;
mod label;
mod severity;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use identifier_error::{IdentifierError, LexError, SyntaxError, ValidationError};
pub use label::Label;
pub use severity::Severity;
