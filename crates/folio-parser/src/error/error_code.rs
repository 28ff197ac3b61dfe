//! Error codes for Folio diagnostics.
//!
//! Codes are organized by phase:
//! - `E0xx` - Lexer errors
//! - `E1xx` - Syntax errors
//! - `E2xx` - Validation errors
//! - `Wxxx` - Warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexer Errors (E0xx)
    // =========================================================================
    /// Unexpected character.
    ///
    /// A character was found that is not valid at this position.
    E001,

    /// Unexpected end of input inside the prefix.
    E002,

    // =========================================================================
    // Syntax Errors (E1xx)
    // =========================================================================
    /// Unexpected token.
    E100,

    /// Incomplete input.
    ///
    /// The identifier ended before it was complete.
    E101,

    /// Missing part marker before the first page.
    E102,

    /// Malformed page range: a third endpoint, a dangling dash, or equal
    /// bounds.
    E103,

    /// Unknown category code.
    E104,

    /// A number does not have the width its field requires.
    E105,

    /// Translation without a language code.
    E106,

    /// A part marker with no page number after it.
    E107,

    /// Unknown graphic type code.
    E108,

    // =========================================================================
    // Validation Errors (E2xx)
    // =========================================================================
    /// A number is zero; every field is 1-based.
    E200,

    /// A page span ends before it starts.
    E201,

    /// A part marker is stated more than once.
    E202,

    /// Language code not in the language table.
    E203,

    /// Glyph refers to a font that is not catalogued.
    E204,

    // =========================================================================
    // Warnings (Wxxx)
    // =========================================================================
    /// Valid identifier that is not written in canonical form.
    W001,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            ErrorCode::E106 => "E106",
            ErrorCode::E107 => "E107",
            ErrorCode::E108 => "E108",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::W001 => "W001",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unexpected character",
            ErrorCode::E002 => "unexpected end of input",
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "incomplete identifier",
            ErrorCode::E102 => "missing part marker",
            ErrorCode::E103 => "malformed range",
            ErrorCode::E104 => "unknown category",
            ErrorCode::E105 => "bad digit width",
            ErrorCode::E106 => "missing language code",
            ErrorCode::E107 => "incomplete part",
            ErrorCode::E108 => "unknown graphic type",
            ErrorCode::E200 => "zero number",
            ErrorCode::E201 => "descending range",
            ErrorCode::E202 => "repeated part",
            ErrorCode::E203 => "unknown language",
            ErrorCode::E204 => "unknown font",
            ErrorCode::W001 => "non-canonical form",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E103.to_string(), "E103");
        assert_eq!(ErrorCode::W001.to_string(), "W001");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E105.description(), "bad digit width");
        assert_eq!(ErrorCode::E202.description(), "repeated part");
    }
}
