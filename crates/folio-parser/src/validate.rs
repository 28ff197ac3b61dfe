//! Semantic validation of identifier trees.
//!
//! The parser only checks that tokens have the shape of their category. This
//! pass enforces the remaining rules, in order, and stops at the first
//! failure:
//!
//! 1. **Digit width**: pages, fonts, graphics and layouts are written with two
//!    digits, glyph ids with four. Zero values are rejected next.
//! 2. **Range ordering**: a span needs two different endpoints, and its end
//!    may not precede its start.
//! 3. **Part non-repetition**: each part marker is written at most once.
//! 4. **Language membership**: translation codes must be in the language
//!    table.
//! 5. **Font cross-reference**: glyphs must belong to a catalogued font.
//!
//! A part marker with no page is already rejected by the parser, so there is
//! no rule for it here.
//!
//! Lookups go through the read-only collaborators in [`ValidationContext`].

use std::collections::HashMap;

use log::trace;

use folio_core::{
    index::FontIndex,
    language::LanguageCode,
    lookup::{FontCatalogue, LanguageTable},
    part::PartCode,
};

use crate::{
    error::{IdentifierError, SyntaxError, ValidationError},
    parser_types::{IdentifierTree, Numeral, PageItem, numeral_value},
    span::{Span, Spanned},
};

/// Lookup tables consulted during validation.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    pub languages: &'a dyn LanguageTable,
    pub fonts: &'a dyn FontCatalogue,
}

impl<'a> ValidationContext<'a> {
    pub fn new(languages: &'a dyn LanguageTable, fonts: &'a dyn FontCatalogue) -> Self {
        Self { languages, fonts }
    }
}

/// A numeric field and the width it must be written with.
#[derive(Debug, Clone, Copy)]
struct Field {
    name: &'static str,
    width: usize,
    expected: &'static str,
}

const PAGE: Field = Field {
    name: "page number",
    width: 2,
    expected: "a two-digit page number",
};
const FONT: Field = Field {
    name: "font index",
    width: 2,
    expected: "a two-digit font index",
};
const GLYPH: Field = Field {
    name: "glyph id",
    width: 4,
    expected: "a four-digit glyph id",
};
const GRAPHIC: Field = Field {
    name: "graphic index",
    width: 2,
    expected: "a two-digit graphic index",
};
const LAYOUT: Field = Field {
    name: "layout index",
    width: 2,
    expected: "a two-digit layout index",
};

/// Every numeral of the tree with its field, in source order.
fn numerals<'t, 'a>(tree: &'t IdentifierTree<'a>) -> Vec<(Field, &'t Numeral<'a>)> {
    match tree {
        IdentifierTree::Pages(items) => items
            .iter()
            .flat_map(|item| std::iter::once(&item.start).chain(item.end.as_ref()))
            .map(|numeral| (PAGE, numeral))
            .collect(),
        IdentifierTree::Transcription(spec) | IdentifierTree::Translation { page: spec, .. } => {
            vec![(PAGE, &spec.page)]
        }
        IdentifierTree::Font(font) => vec![(FONT, font)],
        IdentifierTree::Glyph { font, glyph } => vec![(FONT, font), (GLYPH, glyph)],
        IdentifierTree::Graphic { index, .. } => vec![(GRAPHIC, index)],
        IdentifierTree::Layout(layout) => vec![(LAYOUT, layout)],
    }
}

struct Validator<'c> {
    ctx: &'c ValidationContext<'c>,
}

impl<'c> Validator<'c> {
    fn new(ctx: &'c ValidationContext<'c>) -> Self {
        Self { ctx }
    }

    fn validate(&self, tree: &IdentifierTree<'_>) -> Result<(), IdentifierError> {
        self.check_numbers(tree)?;

        if let IdentifierTree::Pages(items) = tree {
            Self::check_ranges(items)?;
            Self::check_parts(items)?;
        }

        match tree {
            IdentifierTree::Translation { language, .. } => self.check_language(language)?,
            IdentifierTree::Glyph { font, .. } => self.check_font(font)?,
            _ => {}
        }

        Ok(())
    }

    // ============================================================================
    // Rules
    // ============================================================================

    /// Width first for every numeral, then zero values.
    fn check_numbers(&self, tree: &IdentifierTree<'_>) -> Result<(), IdentifierError> {
        let numerals = numerals(tree);
        trace!(numerals = numerals.len(); "Checking numbers");

        for (field, numeral) in &numerals {
            if numeral.inner().len() != field.width {
                return Err(SyntaxError::BadDigitWidth {
                    span: numeral.span(),
                    expected: field.expected,
                    found: numeral.inner().to_string(),
                }
                .into());
            }
        }

        for (field, numeral) in &numerals {
            if numeral_value(numeral) == 0 {
                return Err(ValidationError::ZeroNumber {
                    span: numeral.span(),
                    field: field.name,
                    found: numeral.inner().to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    fn check_ranges(items: &[PageItem<'_>]) -> Result<(), IdentifierError> {
        for item in items {
            let Some(end) = &item.end else {
                continue;
            };
            let span = item.start.span().union(end.span());
            let (first, last) = (numeral_value(&item.start), numeral_value(end));

            if first == last {
                return Err(SyntaxError::MalformedRange {
                    span,
                    expected: "two different page numbers",
                    found: format!("{}-{}", item.start.inner(), end.inner()),
                }
                .into());
            }
            if last < first {
                return Err(ValidationError::DescendingRange {
                    span,
                    start: item.start.inner().to_string(),
                    end: end.inner().to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn check_parts(items: &[PageItem<'_>]) -> Result<(), IdentifierError> {
        let mut stated: HashMap<PartCode, Span> = HashMap::new();

        for marker in items.iter().filter_map(|item| item.marker) {
            if let Some(first) = stated.insert(*marker.inner(), marker.span()) {
                return Err(ValidationError::PartRepeated {
                    span: marker.span(),
                    first,
                    part: *marker.inner(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn check_language(&self, language: &Spanned<&str>) -> Result<(), IdentifierError> {
        let known = LanguageCode::new(language.inner())
            .is_some_and(|code| self.ctx.languages.contains(code));

        if known {
            Ok(())
        } else {
            Err(ValidationError::UnknownLanguage {
                span: language.span(),
                code: language.inner().to_string(),
            }
            .into())
        }
    }

    fn check_font(&self, font: &Numeral<'_>) -> Result<(), IdentifierError> {
        match FontIndex::new(numeral_value(font)) {
            Some(index) if self.ctx.fonts.contains_font(index) => Ok(()),
            Some(index) => Err(ValidationError::UnknownFont {
                span: font.span(),
                font: index,
            }
            .into()),
            None => Err(ValidationError::ZeroNumber {
                span: font.span(),
                field: FONT.name,
                found: font.inner().to_string(),
            }
            .into()),
        }
    }
}

/// Check an identifier tree against the semantic rules.
///
/// # Errors
///
/// Returns the first rule violation. Digit width and equal span bounds are
/// reported as [`SyntaxError`]s, everything else as a [`ValidationError`].
pub fn validate(tree: &IdentifierTree<'_>, ctx: &ValidationContext<'_>) -> Result<(), IdentifierError> {
    Validator::new(ctx).validate(tree)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use folio_core::language::Iso639;

    use super::*;
    use crate::{lexer::tokenize, parser::build_identifier};

    fn fonts() -> BTreeSet<FontIndex> {
        [1, 2].into_iter().filter_map(FontIndex::new).collect()
    }

    fn check(input: &'static str) -> Result<(), IdentifierError> {
        let tokens = tokenize(input).expect("input should tokenize");
        let tokens: &'static [_] = Box::leak(tokens.into_boxed_slice());
        let tree = build_identifier(tokens).expect("input should parse");

        let fonts = fonts();
        let ctx = ValidationContext::new(&Iso639, &fonts);
        validate(tree.inner(), &ctx)
    }

    #[test]
    fn test_valid_identifiers() {
        for input in [
            "FN-PG-P1-01-03, 05, P2-07, 09-11, P3-02",
            "FN-TR-P3-99",
            "FN-TL-P1-12-EN",
            "FN-TL-P1-12-la",
            "FN-F-07",
            "FN-FG-02-0042",
            "FN-GR-IL-01",
            "FN-L-10",
        ] {
            assert_eq!(check(input), Ok(()), "{input}");
        }
    }

    #[test]
    fn test_digit_width() {
        let err = check("FN-PG-P1-1").unwrap_err();
        assert!(matches!(err, IdentifierError::Syntax(SyntaxError::BadDigitWidth { .. })));
        assert_eq!(err.span(), Span::new(9..10));

        assert!(matches!(
            check("FN-FG-01-001"),
            Err(IdentifierError::Syntax(SyntaxError::BadDigitWidth { .. }))
        ));
        assert!(matches!(
            check("FN-L-001"),
            Err(IdentifierError::Syntax(SyntaxError::BadDigitWidth { .. }))
        ));
    }

    #[test]
    fn test_width_before_zero() {
        // The badly padded `5` is reported before the zero `00`.
        let err = check("FN-PG-P1-00, 5").unwrap_err();
        assert!(matches!(err, IdentifierError::Syntax(SyntaxError::BadDigitWidth { .. })));
    }

    #[test]
    fn test_zero_number() {
        let err = check("FN-FG-01-0000").unwrap_err();
        assert_eq!(
            err,
            IdentifierError::Validation(ValidationError::ZeroNumber {
                span: Span::new(9..13),
                field: "glyph id",
                found: "0000".to_string(),
            })
        );
    }

    #[test]
    fn test_range_ordering() {
        let err = check("FN-PG-P1-03-03").unwrap_err();
        assert!(matches!(err, IdentifierError::Syntax(SyntaxError::MalformedRange { .. })));
        assert_eq!(err.span(), Span::new(9..14));

        let err = check("FN-PG-P1-05-02").unwrap_err();
        assert_eq!(
            err,
            IdentifierError::Validation(ValidationError::DescendingRange {
                span: Span::new(9..14),
                start: "05".to_string(),
                end: "02".to_string(),
            })
        );
    }

    #[test]
    fn test_part_repeated() {
        let err = check("FN-PG-P1-01, P1-03").unwrap_err();
        assert_eq!(
            err,
            IdentifierError::Validation(ValidationError::PartRepeated {
                span: Span::new(13..15),
                first: Span::new(6..8),
                part: PartCode::P1,
            })
        );

        assert!(matches!(
            check("FN-PG-P1-01, P2-02, P1-03"),
            Err(IdentifierError::Validation(ValidationError::PartRepeated { .. }))
        ));
    }

    #[test]
    fn test_language_membership() {
        let err = check("FN-TL-P1-12-XX").unwrap_err();
        assert_eq!(
            err,
            IdentifierError::Validation(ValidationError::UnknownLanguage {
                span: Span::new(12..14),
                code: "XX".to_string(),
            })
        );
    }

    #[test]
    fn test_font_cross_reference() {
        let err = check("FN-FG-03-0001").unwrap_err();
        assert!(matches!(
            err,
            IdentifierError::Validation(ValidationError::UnknownFont { font, .. }) if font.get() == 3
        ));
        // Fonts themselves are not looked up.
        assert_eq!(check("FN-F-03"), Ok(()));
    }
}
