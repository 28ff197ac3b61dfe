//! Elaboration of validated trees into [`Identifier`] values.
//!
//! Numerals become fixed-width index types and page items become
//! [`Segment`]s. The tree must have passed [`validate`](crate::validate)
//! first; the conversions below still fail cleanly on an unvalidated tree
//! instead of panicking.

use log::{debug, trace};

use folio_core::{
    identifier::Identifier,
    index::{FontIndex, GlyphId, GraphicIndex, IndexOutOfRange, LayoutIndex},
    language::LanguageCode,
    pages::{PageRange, Segment},
    part::{PageNumber, PageRef},
};

use crate::{
    error::{IdentifierError, SyntaxError, ValidationError},
    parser_types::{IdentifierTree, Numeral, PageItem, PageSpec, numeral_value},
    span::Span,
};

fn convert<T>(numeral: &Numeral<'_>) -> Result<T, IdentifierError>
where
    T: TryFrom<u16, Error = IndexOutOfRange>,
{
    T::try_from(numeral_value(numeral)).map_err(|err| {
        ValidationError::ZeroNumber {
            span: numeral.span(),
            field: err.kind,
            found: numeral.inner().to_string(),
        }
        .into()
    })
}

fn page_ref(spec: &PageSpec<'_>) -> Result<PageRef, IdentifierError> {
    Ok(PageRef::new(*spec.part.inner(), convert(&spec.page)?))
}

fn segment(item: &PageItem<'_>) -> Result<Segment, IdentifierError> {
    let start: PageNumber = convert(&item.start)?;
    let Some(end) = &item.end else {
        return Ok(Segment::single(item.part, start));
    };

    Segment::span(item.part, start, convert(end)?).map_err(|err| {
        SyntaxError::MalformedRange {
            span: item.span(),
            expected: "an ascending page span",
            found: err.to_string(),
        }
        .into()
    })
}

fn page_range(items: &[PageItem<'_>]) -> Result<Identifier, IdentifierError> {
    if let [item @ PageItem { end: None, .. }] = items {
        return Ok(Identifier::Page(PageRef::new(item.part, convert(&item.start)?)));
    }

    let segments = items.iter().map(segment).collect::<Result<Vec<_>, _>>()?;
    trace!(segments = segments.len(); "Built page segments");

    let span = items
        .iter()
        .map(PageItem::span)
        .reduce(|acc, span| acc.union(span))
        .unwrap_or_default();

    PageRange::new(segments)
        .map(Identifier::PageRange)
        .map_err(|err| {
            SyntaxError::MalformedRange {
                span,
                expected: "a page list",
                found: err.to_string(),
            }
            .into()
        })
}

/// Convert a validated identifier tree into an [`Identifier`].
///
/// # Errors
///
/// Only fails on trees that would not pass validation.
pub fn elaborate(tree: &IdentifierTree<'_>) -> Result<Identifier, IdentifierError> {
    let identifier = match tree {
        IdentifierTree::Pages(items) => page_range(items)?,
        IdentifierTree::Transcription(spec) => Identifier::Transcription(page_ref(spec)?),
        IdentifierTree::Translation { page, language } => {
            let code = LanguageCode::new(language.inner()).ok_or_else(|| {
                ValidationError::UnknownLanguage {
                    span: language.span(),
                    code: language.inner().to_string(),
                }
            })?;
            Identifier::Translation {
                page: page_ref(page)?,
                language: code,
            }
        }
        IdentifierTree::Font(font) => Identifier::Font(convert::<FontIndex>(font)?),
        IdentifierTree::Glyph { font, glyph } => Identifier::Glyph {
            font: convert(font)?,
            glyph: convert::<GlyphId>(glyph)?,
        },
        IdentifierTree::Graphic { kind, index } => Identifier::Graphic {
            kind: *kind.inner(),
            index: convert::<GraphicIndex>(index)?,
        },
        IdentifierTree::Layout(layout) => Identifier::Layout(convert::<LayoutIndex>(layout)?),
    };

    debug!(category:? = identifier.category(); "Elaborated identifier");
    Ok(identifier)
}
