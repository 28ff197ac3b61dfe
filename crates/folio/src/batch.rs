//! Results of checking many identifiers at once.
//!
//! A batch is plain text with one identifier per line. Blank lines and lines
//! starting with `#` are skipped. Every remaining line is checked on its own;
//! a failing line never stops the batch.

use folio_core::identifier::Identifier;
use folio_parser::error::{Diagnostic, IdentifierError};

/// What checking a single line found.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Valid and already written in canonical form.
    Valid(Identifier),
    /// Valid, but written differently from its canonical form.
    NonCanonical {
        identifier: Identifier,
        warning: Diagnostic,
    },
    Invalid(IdentifierError),
}

/// One checked line of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedLine {
    line: usize,
    source: String,
    outcome: Outcome,
}

impl CheckedLine {
    pub(crate) fn new(line: usize, source: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            line,
            source: source.into(),
            outcome,
        }
    }

    /// 1-based line number within the batch.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The identifier text, without surrounding whitespace.
    ///
    /// Diagnostic spans point into this text.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// The diagnostic to report for this line, if any.
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        match &self.outcome {
            Outcome::Valid(_) => None,
            Outcome::NonCanonical { warning, .. } => Some(warning.clone()),
            Outcome::Invalid(err) => Some(err.diagnostic()),
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self.outcome, Outcome::Invalid(_))
    }
}

/// All checked lines of a batch, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    lines: Vec<CheckedLine>,
}

impl BatchReport {
    pub(crate) fn new(lines: Vec<CheckedLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[CheckedLine] {
        &self.lines
    }

    /// Number of lines that failed to validate.
    pub fn failures(&self) -> usize {
        self.lines.iter().filter(|line| line.is_invalid()).count()
    }

    /// Number of valid lines not written in canonical form.
    pub fn warnings(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| matches!(line.outcome, Outcome::NonCanonical { .. }))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.lines.iter().any(CheckedLine::is_invalid)
    }
}
