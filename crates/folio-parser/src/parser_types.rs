//! The identifier tree produced by the [`parser`](crate::parser).
//!
//! Leaf values keep the text and span they were parsed from; numbers in
//! particular keep their digits so the validator can check their width.
//! Composite nodes derive their span from their children.

use folio_core::{identifier::GraphicType, part::PartCode};

use crate::span::{Span, Spanned};

/// A run of digits exactly as written, e.g. `"007"`.
pub type Numeral<'a> = Spanned<&'a str>;

/// Numeric value of a numeral, saturating at `u16::MAX`.
pub fn numeral_value(numeral: &Numeral<'_>) -> u16 {
    numeral.inner().bytes().fold(0u16, |acc, digit| {
        acc.saturating_mul(10)
            .saturating_add(u16::from(digit.wrapping_sub(b'0')))
    })
}

/// One comma-separated item of a page list: `P1-01`, `03` or `05-07`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageItem<'a> {
    /// The part marker written on this item, if any.
    pub marker: Option<Spanned<PartCode>>,
    /// The part in effect: the marker, or the nearest preceding one.
    pub part: PartCode,
    pub start: Numeral<'a>,
    pub end: Option<Numeral<'a>>,
}

impl PageItem<'_> {
    pub fn span(&self) -> Span {
        let span = self
            .marker
            .map_or(self.start.span(), |marker| marker.span().union(self.start.span()));
        self.end.map_or(span, |end| span.union(end.span()))
    }
}

/// A single page with a mandatory part: `P1-12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec<'a> {
    pub part: Spanned<PartCode>,
    pub page: Numeral<'a>,
}

/// A parsed, not yet validated identifier, one variant per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierTree<'a> {
    /// `PG`: one or more page items.
    Pages(Vec<PageItem<'a>>),
    /// `TR`
    Transcription(PageSpec<'a>),
    /// `TL`: the language code as written, in either case.
    Translation {
        page: PageSpec<'a>,
        language: Spanned<&'a str>,
    },
    /// `F`
    Font(Numeral<'a>),
    /// `FG`
    Glyph {
        font: Numeral<'a>,
        glyph: Numeral<'a>,
    },
    /// `GR`
    Graphic {
        kind: Spanned<GraphicType>,
        index: Numeral<'a>,
    },
    /// `L`
    Layout(Numeral<'a>),
}
