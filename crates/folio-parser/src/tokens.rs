//! Tokens produced by the [`lexer`](crate::lexer).

use std::fmt;

use folio_core::part::PartCode;

use crate::span::Span;

/// Token types of the identifier notation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'src> {
    /// The family prefix, `FN`.
    Prefix,
    /// `-`
    Dash,
    /// `,`
    Comma,
    /// The category code as written, e.g. `PG`. Interpreted by the parser.
    Category(&'src str),
    /// A part marker, `P1` to `P3`.
    Part(PartCode),
    /// A run of ASCII digits; its width is the length of the text.
    Number(&'src str),
    /// A two-letter code: a language code or a graphic type.
    Code(&'src str),
}

impl Token<'_> {
    /// Short description used in diagnostics, e.g. ``number `07` ``.
    pub fn describe(&self) -> String {
        match self {
            Token::Prefix => "prefix `FN`".to_string(),
            Token::Dash => "`-`".to_string(),
            Token::Comma => "`,`".to_string(),
            Token::Category(code) => format!("category `{code}`"),
            Token::Part(part) => format!("part marker `{part}`"),
            Token::Number(digits) => format!("number `{digits}`"),
            Token::Code(code) => format!("code `{code}`"),
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Prefix => write!(f, "FN"),
            Token::Dash => write!(f, "-"),
            Token::Comma => write!(f, ","),
            Token::Category(code) | Token::Number(code) | Token::Code(code) => {
                write!(f, "{code}")
            }
            Token::Part(part) => write!(f, "{part}"),
        }
    }
}

/// A token with its byte span in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span) -> Self {
        Self { token, span }
    }
}

impl fmt::Display for PositionedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.token.fmt(f)
    }
}
