//! The three error kinds of the pipeline and their diagnostics.
//!
//! Each phase has its own error enum: [`LexError`] for the character stream,
//! [`SyntaxError`] for token shape, [`ValidationError`] for semantic rules.
//! [`IdentifierError`] wraps whichever one stopped the pipeline.

use thiserror::Error;

use folio_core::{
    identifier::{Category, GraphicType},
    index::FontIndex,
    part::PartCode,
};

use crate::{
    error::{Diagnostic, ErrorCode},
    span::Span,
};

/// A character the lexer cannot accept at its position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character `{found}`, expected {expected}")]
    UnexpectedCharacter {
        position: usize,
        found: char,
        expected: &'static str,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd {
        position: usize,
        expected: &'static str,
    },
}

impl LexError {
    /// Byte offset of the offending character, or of the end of input.
    pub fn position(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::UnexpectedEnd { position, .. } => *position,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedCharacter {
                position, found, ..
            } => Span::new(*position..position + found.len_utf8()),
            LexError::UnexpectedEnd { position, .. } => Span::point(*position),
        }
    }

    pub fn expected(&self) -> &'static str {
        match self {
            LexError::UnexpectedCharacter { expected, .. }
            | LexError::UnexpectedEnd { expected, .. } => expected,
        }
    }
}

/// A token sequence that does not have the shape of its category.
///
/// Every variant records the span of the offending text, a description of
/// what was expected there and of what was found instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("missing part marker, found {found}")]
    MissingPart {
        span: Span,
        expected: &'static str,
        found: String,
    },

    #[error("malformed page range, expected {expected}, found {found}")]
    MalformedRange {
        span: Span,
        expected: &'static str,
        found: String,
    },

    #[error("unknown category `{found}`")]
    UnknownCategory {
        span: Span,
        expected: &'static str,
        found: String,
    },

    #[error("expected {expected}, found `{found}`")]
    BadDigitWidth {
        span: Span,
        expected: &'static str,
        found: String,
    },

    #[error("missing language code, found {found}")]
    MissingLanguageCode {
        span: Span,
        expected: &'static str,
        found: String,
    },

    #[error("part marker `{found}` is not followed by a page number")]
    PartIncomplete {
        span: Span,
        expected: &'static str,
        found: String,
    },

    #[error("unknown graphic type `{found}`")]
    UnknownGraphicType {
        span: Span,
        expected: &'static str,
        found: String,
    },

    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        span: Span,
        expected: &'static str,
        found: String,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd {
        span: Span,
        expected: &'static str,
        found: String,
    },
}

impl SyntaxError {
    pub fn span(&self) -> Span {
        match self {
            SyntaxError::MissingPart { span, .. }
            | SyntaxError::MalformedRange { span, .. }
            | SyntaxError::UnknownCategory { span, .. }
            | SyntaxError::BadDigitWidth { span, .. }
            | SyntaxError::MissingLanguageCode { span, .. }
            | SyntaxError::PartIncomplete { span, .. }
            | SyntaxError::UnknownGraphicType { span, .. }
            | SyntaxError::UnexpectedToken { span, .. }
            | SyntaxError::UnexpectedEnd { span, .. } => *span,
        }
    }

    pub fn expected(&self) -> &'static str {
        match self {
            SyntaxError::MissingPart { expected, .. }
            | SyntaxError::MalformedRange { expected, .. }
            | SyntaxError::UnknownCategory { expected, .. }
            | SyntaxError::BadDigitWidth { expected, .. }
            | SyntaxError::MissingLanguageCode { expected, .. }
            | SyntaxError::PartIncomplete { expected, .. }
            | SyntaxError::UnknownGraphicType { expected, .. }
            | SyntaxError::UnexpectedToken { expected, .. }
            | SyntaxError::UnexpectedEnd { expected, .. } => expected,
        }
    }

    pub fn found(&self) -> &str {
        match self {
            SyntaxError::MissingPart { found, .. }
            | SyntaxError::MalformedRange { found, .. }
            | SyntaxError::UnknownCategory { found, .. }
            | SyntaxError::BadDigitWidth { found, .. }
            | SyntaxError::MissingLanguageCode { found, .. }
            | SyntaxError::PartIncomplete { found, .. }
            | SyntaxError::UnknownGraphicType { found, .. }
            | SyntaxError::UnexpectedToken { found, .. }
            | SyntaxError::UnexpectedEnd { found, .. } => found,
        }
    }

    fn code(&self) -> ErrorCode {
        match self {
            SyntaxError::UnexpectedToken { .. } => ErrorCode::E100,
            SyntaxError::UnexpectedEnd { .. } => ErrorCode::E101,
            SyntaxError::MissingPart { .. } => ErrorCode::E102,
            SyntaxError::MalformedRange { .. } => ErrorCode::E103,
            SyntaxError::UnknownCategory { .. } => ErrorCode::E104,
            SyntaxError::BadDigitWidth { .. } => ErrorCode::E105,
            SyntaxError::MissingLanguageCode { .. } => ErrorCode::E106,
            SyntaxError::PartIncomplete { .. } => ErrorCode::E107,
            SyntaxError::UnknownGraphicType { .. } => ErrorCode::E108,
        }
    }

    fn help(&self) -> Option<String> {
        let help = match self {
            SyntaxError::MissingPart { .. } => {
                "start the page list with a part marker, e.g. `P1-01`".to_string()
            }
            SyntaxError::MalformedRange { .. } => {
                "a span has two different endpoints, e.g. `01-03`; write a single page as `01`"
                    .to_string()
            }
            SyntaxError::UnknownCategory { .. } => {
                let known: Vec<&str> = Category::ALL.iter().map(|c| c.code()).collect();
                format!("known categories: {}", known.join(", "))
            }
            SyntaxError::BadDigitWidth { .. } => {
                "pad the number with leading zeros to its full width".to_string()
            }
            SyntaxError::MissingLanguageCode { .. } => {
                "end a translation with an ISO 639-1 code, e.g. `-EN`".to_string()
            }
            SyntaxError::PartIncomplete { .. } => {
                "follow the part marker with a page number, e.g. `P2-01`, or remove it".to_string()
            }
            SyntaxError::UnknownGraphicType { .. } => {
                let known: Vec<&str> = GraphicType::ALL.iter().map(|t| t.code()).collect();
                format!("known graphic types: {}", known.join(", "))
            }
            SyntaxError::UnexpectedToken { .. } | SyntaxError::UnexpectedEnd { .. } => {
                return None;
            }
        };
        Some(help)
    }
}

/// A well-shaped identifier that breaks a semantic rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} `{found}` is zero")]
    ZeroNumber {
        span: Span,
        field: &'static str,
        found: String,
    },

    #[error("page span `{start}-{end}` runs backwards")]
    DescendingRange {
        span: Span,
        start: String,
        end: String,
    },

    #[error("part `{part}` is stated more than once")]
    PartRepeated {
        span: Span,
        first: Span,
        part: PartCode,
    },

    #[error("unknown language code `{code}`")]
    UnknownLanguage { span: Span, code: String },

    #[error("font `{font}` is not in the catalogue")]
    UnknownFont { span: Span, font: FontIndex },
}

impl ValidationError {
    pub fn span(&self) -> Span {
        match self {
            ValidationError::ZeroNumber { span, .. }
            | ValidationError::DescendingRange { span, .. }
            | ValidationError::PartRepeated { span, .. }
            | ValidationError::UnknownLanguage { span, .. }
            | ValidationError::UnknownFont { span, .. } => *span,
        }
    }
}

/// Any failure of the identifier pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl IdentifierError {
    /// Span of the text that caused the failure.
    pub fn span(&self) -> Span {
        match self {
            IdentifierError::Lex(err) => err.span(),
            IdentifierError::Syntax(err) => err.span(),
            IdentifierError::Validation(err) => err.span(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            IdentifierError::Lex(LexError::UnexpectedCharacter { .. }) => ErrorCode::E001,
            IdentifierError::Lex(LexError::UnexpectedEnd { .. }) => ErrorCode::E002,
            IdentifierError::Syntax(err) => err.code(),
            IdentifierError::Validation(err) => match err {
                ValidationError::ZeroNumber { .. } => ErrorCode::E200,
                ValidationError::DescendingRange { .. } => ErrorCode::E201,
                ValidationError::PartRepeated { .. } => ErrorCode::E202,
                ValidationError::UnknownLanguage { .. } => ErrorCode::E203,
                ValidationError::UnknownFont { .. } => ErrorCode::E204,
            },
        }
    }

    /// Build the diagnostic report for this error.
    pub fn diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string()).with_code(self.code());

        match self {
            IdentifierError::Lex(err) => {
                let diag = diag.with_label(err.span(), format!("expected {}", err.expected()));
                match err {
                    LexError::UnexpectedCharacter { found, .. } if found.is_whitespace() => {
                        diag.with_help("whitespace is only allowed after a comma")
                    }
                    LexError::UnexpectedEnd { .. } => {
                        diag.with_help("identifiers start with `FN-`")
                    }
                    LexError::UnexpectedCharacter { .. } => diag,
                }
            }
            IdentifierError::Syntax(err) => {
                let diag = diag.with_label(err.span(), format!("expected {}", err.expected()));
                match err.help() {
                    Some(help) => diag.with_help(help),
                    None => diag,
                }
            }
            IdentifierError::Validation(err) => match err {
                ValidationError::ZeroNumber { span, .. } => diag
                    .with_label(*span, "numbering starts at 1")
                    .with_help("use a value of at least 1"),
                ValidationError::DescendingRange {
                    span, start, end, ..
                } => diag
                    .with_label(*span, "ends before it starts")
                    .with_help(format!("write the span as `{end}-{start}`")),
                ValidationError::PartRepeated { span, first, .. } => diag
                    .with_label(*span, "stated again here")
                    .with_secondary_label(*first, "first stated here")
                    .with_help("list all pages of a part in one group, e.g. `P1-01, 03`"),
                ValidationError::UnknownLanguage { span, .. } => {
                    diag.with_label(*span, "not an ISO 639-1 language code")
                }
                ValidationError::UnknownFont { span, font } => diag
                    .with_label(*span, "no catalogued font with this index")
                    .with_help(format!("catalogue the font as `FN-F-{font}` first")),
            },
        }
    }
}
