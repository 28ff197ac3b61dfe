//! Labeled source spans for diagnostics.

use crate::span::Span;

/// A message attached to a span of the identifier text.
///
/// A diagnostic has one primary label marking where the problem is, and
/// may carry secondary labels for related locations:
///
/// ```text
/// error[E202]: part `P1` is stated more than once
///   |
/// 1 | FN-PG-P1-01, P1-03
///   |       --     ^^ stated again here
///   |       |
///   |       first stated here
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}
