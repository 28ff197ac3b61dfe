//! # Folio Parser
//!
//! Parser for Folio catalogue identifiers such as `FN-PG-P1-01-03, 05` or
//! `FN-TL-P1-12-EN`. This crate provides the pipeline from identifier text
//! to a validated [`Identifier`](folio_core::identifier::Identifier).
//!
//! ## Usage
//!
//! ```
//! # use std::collections::BTreeSet;
//! # use folio_core::{index::FontIndex, language::Iso639};
//! # use folio_parser::{parse, ValidationContext, error::IdentifierError};
//!
//! fn main() -> Result<(), IdentifierError> {
//!     let fonts: BTreeSet<FontIndex> = BTreeSet::new();
//!     let ctx = ValidationContext::new(&Iso639, &fonts);
//!
//!     let identifier = parse("FN-PG-P1-01-03, 05, P2-07", &ctx)?;
//!     assert_eq!(identifier.pages().map(|pages| pages.len()), Some(5));
//!     Ok(())
//! }
//! ```
//!
//! The individual phases are public as well, for callers that need the
//! token stream or the spanned tree.

mod elaborate;
pub mod error;
mod lexer;
mod parser;
pub mod parser_types;
mod span;
mod tokens;
mod validate;

pub use elaborate::elaborate;
pub use lexer::tokenize;
pub use parser::build_identifier;
pub use span::{Span, Spanned};
pub use tokens::{PositionedToken, Token};
pub use validate::{ValidationContext, validate};

use log::{debug, trace};

use folio_core::identifier::Identifier;

use error::IdentifierError;

/// Parse identifier text into a validated [`Identifier`].
///
/// This is the main entry point. It runs the complete pipeline:
///
/// 1. **Tokenize** - Convert the text to tokens
/// 2. **Parse** - Build the identifier tree for the category
/// 3. **Validate** - Check widths, ordering, parts and lookups
/// 4. **Elaborate** - Convert the tree into an [`Identifier`]
///
/// # Errors
///
/// Returns the first [`IdentifierError`] of whichever phase failed. Its span
/// points into `source`.
pub fn parse(source: &str, ctx: &ValidationContext<'_>) -> Result<Identifier, IdentifierError> {
    debug!(source; "Parsing identifier");

    let tokens = tokenize(source)?;
    trace!(tokens:?; "Tokenized identifier");

    let tree = build_identifier(&tokens)?;
    validate(tree.inner(), ctx)?;

    elaborate(tree.inner())
}
