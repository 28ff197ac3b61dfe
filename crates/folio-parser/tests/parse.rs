use std::collections::BTreeSet;

use proptest::prelude::*;

use folio_core::{
    identifier::Identifier,
    index::FontIndex,
    language::Iso639,
    pages::normalize,
    part::{PageNumber, PageRef, PartCode},
};
use folio_parser::{
    Span, ValidationContext,
    error::{ErrorCode, IdentifierError, SyntaxError, ValidationError},
    parse,
};

fn fonts() -> BTreeSet<FontIndex> {
    [1, 2, 5].into_iter().filter_map(FontIndex::new).collect()
}

fn parse_str(source: &str) -> Result<Identifier, IdentifierError> {
    let fonts = fonts();
    let ctx = ValidationContext::new(&Iso639, &fonts);
    parse(source, &ctx)
}

fn page(part: PartCode, page: u16) -> PageRef {
    PageRef::new(part, PageNumber::new(page).unwrap())
}

#[test]
fn test_expansion_example() {
    let identifier = parse_str("FN-PG-P1-01-03, 05, P2-07, 09-11, P3-02").unwrap();

    assert_eq!(
        identifier.pages().unwrap(),
        vec![
            page(PartCode::P1, 1),
            page(PartCode::P1, 2),
            page(PartCode::P1, 3),
            page(PartCode::P1, 5),
            page(PartCode::P2, 7),
            page(PartCode::P2, 9),
            page(PartCode::P2, 10),
            page(PartCode::P2, 11),
            page(PartCode::P3, 2),
        ]
    );
}

#[test]
fn test_overlaps_are_merged() {
    let identifier = parse_str("FN-PG-P1-01-04, 03-06, 02").unwrap();

    let pages = identifier.pages().unwrap();
    assert_eq!(pages.len(), 6);
    assert_eq!(
        normalize(pages).unwrap().to_string(),
        "FN-PG-P1-01-06"
    );
}

#[test]
fn test_three_endpoints() {
    let err = parse_str("FN-PG-P1-01-03-05").unwrap_err();
    assert!(matches!(
        err,
        IdentifierError::Syntax(SyntaxError::MalformedRange { .. })
    ));
    assert_eq!(err.code(), ErrorCode::E103);
}

#[test]
fn test_part_repeated() {
    let err = parse_str("FN-PG-P1-01, P1-03").unwrap_err();
    assert!(matches!(
        err,
        IdentifierError::Validation(ValidationError::PartRepeated {
            part: PartCode::P1,
            ..
        })
    ));

    let diag = err.diagnostic();
    assert_eq!(diag.primary_span(), Some(Span::new(13..15)));
    assert_eq!(diag.labels().len(), 2);
}

#[test]
fn test_part_incomplete() {
    let err = parse_str("FN-PG-P1-01, P2").unwrap_err();
    assert!(matches!(
        err,
        IdentifierError::Syntax(SyntaxError::PartIncomplete { .. })
    ));
    assert_eq!(err.span(), Span::new(13..15));
}

#[test]
fn test_bad_digit_width() {
    let err = parse_str("FN-PG-P1-1").unwrap_err();
    assert!(matches!(
        err,
        IdentifierError::Syntax(SyntaxError::BadDigitWidth { .. })
    ));
    assert_eq!(err.code(), ErrorCode::E105);
}

#[test]
fn test_language_lookup() {
    let err = parse_str("FN-TL-P1-12-XX").unwrap_err();
    assert!(matches!(
        err,
        IdentifierError::Validation(ValidationError::UnknownLanguage { .. })
    ));

    let identifier = parse_str("FN-TL-P1-12-EN").unwrap();
    assert_eq!(identifier.pages(), Some(vec![page(PartCode::P1, 12)]));
}

#[test]
fn test_glyph_font_lookup() {
    assert!(parse_str("FN-FG-05-0100").is_ok());
    assert!(matches!(
        parse_str("FN-FG-04-0100"),
        Err(IdentifierError::Validation(ValidationError::UnknownFont { .. }))
    ));
}

#[test]
fn test_lex_errors() {
    let err = parse_str("FN-PG-P1-01 ,02").unwrap_err();
    assert!(matches!(err, IdentifierError::Lex(_)));
    assert_eq!(err.span(), Span::new(11..12));
    assert_eq!(
        err.diagnostic().help(),
        Some("whitespace is only allowed after a comma")
    );

    assert!(matches!(parse_str(""), Err(IdentifierError::Lex(_))));
}

#[test]
fn test_display_is_canonical_text() {
    for source in [
        "FN-PG-P1-12",
        "FN-PG-P1-01-03, 05, P2-07",
        "FN-TR-P2-04",
        "FN-TL-P3-01-DE",
        "FN-F-09",
        "FN-FG-01-0420",
        "FN-GR-OR-11",
        "FN-L-03",
    ] {
        assert_eq!(parse_str(source).unwrap().to_string(), source);
    }
}

#[test]
fn test_shared_context_across_threads() {
    let fonts = fonts();
    let ctx = ValidationContext::new(&Iso639, &fonts);

    std::thread::scope(|scope| {
        let handles: Vec<_> = ["FN-PG-P1-01", "FN-TL-P1-12-FR", "FN-FG-02-0001"]
            .into_iter()
            .map(|source| scope.spawn(move || parse(source, &ctx).is_ok()))
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    });
}

mod proptest_tests {
    use super::*;

    fn page_set_strategy() -> impl Strategy<Value = BTreeSet<PageRef>> {
        let part = prop::sample::select(PartCode::ALL.to_vec());
        prop::collection::btree_set(
            (part, 1u16..=99).prop_map(|(part, number)| page(part, number)),
            1..40,
        )
    }

    /// Canonical text parses back to exactly the pages it was built from.
    fn check_round_trip(pages: &BTreeSet<PageRef>) -> Result<(), TestCaseError> {
        let canonical = normalize(pages.iter().copied()).unwrap().to_string();
        let parsed = parse_str(&canonical).unwrap();

        let expanded: BTreeSet<PageRef> = parsed.pages().unwrap().into_iter().collect();
        prop_assert_eq!(&expanded, pages);
        Ok(())
    }

    /// Normalizing the expansion of canonical text yields the same text.
    fn check_idempotence(pages: &BTreeSet<PageRef>) -> Result<(), TestCaseError> {
        let canonical = normalize(pages.iter().copied()).unwrap().to_string();
        let again = normalize(parse_str(&canonical).unwrap().pages().unwrap())
            .unwrap()
            .to_string();

        prop_assert_eq!(again, canonical);
        Ok(())
    }

    proptest! {
        #[test]
        fn round_trip(pages in page_set_strategy()) {
            check_round_trip(&pages)?;
        }

        #[test]
        fn idempotence(pages in page_set_strategy()) {
            check_idempotence(&pages)?;
        }
    }
}
