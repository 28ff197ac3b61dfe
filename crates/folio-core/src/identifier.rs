//! The catalogue identifier value and its category-specific parts.
//!
//! An [`Identifier`] is the immutable, validated result of parsing an
//! identifier string, or of normalizing a page set. Its [`Display`]
//! implementation renders the canonical text form:
//!
//! ```text
//! FN-PG-P1-01-03, 05, P2-07      Identifier::PageRange
//! FN-PG-P1-12                    Identifier::Page
//! FN-TR-P1-12                    Identifier::Transcription
//! FN-TL-P1-12-EN                 Identifier::Translation
//! FN-F-01                        Identifier::Font
//! FN-FG-01-0001                  Identifier::Glyph
//! FN-GR-IL-01                    Identifier::Graphic
//! FN-L-01                        Identifier::Layout
//! ```
//!
//! [`Display`]: std::fmt::Display

use std::fmt;

use crate::{
    index::{FontIndex, GlyphId, GraphicIndex, LayoutIndex},
    language::LanguageCode,
    pages::PageRange,
    part::PageRef,
};

/// The prefix shared by every identifier of the family.
pub const PREFIX: &str = "FN";

/// The closed set of identifier categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// `PG`: a page or a page range.
    Page,
    /// `TR`: the transcription of a page.
    Transcription,
    /// `TL`: the translation of a page into a language.
    Translation,
    /// `F`: a font.
    Font,
    /// `FG`: a glyph of a font.
    Glyph,
    /// `GR`: a graphic of a given type.
    Graphic,
    /// `L`: a page layout.
    Layout,
}

impl Category {
    /// All categories, in catalogue order.
    pub const ALL: [Category; 7] = [
        Category::Page,
        Category::Transcription,
        Category::Translation,
        Category::Font,
        Category::Glyph,
        Category::Graphic,
        Category::Layout,
    ];

    /// Returns the category code as written in identifiers.
    pub fn code(self) -> &'static str {
        match self {
            Category::Page => "PG",
            Category::Transcription => "TR",
            Category::Translation => "TL",
            Category::Font => "F",
            Category::Glyph => "FG",
            Category::Graphic => "GR",
            Category::Layout => "L",
        }
    }

    /// Looks up a category by its code. Codes are case-sensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.code() == code)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The closed set of graphic types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GraphicType {
    /// `IL`
    Illustration,
    /// `OR`
    Ornament,
    /// `IN`
    Initial,
    /// `BD`
    Border,
    /// `VG`
    Vignette,
    /// `DG`
    Diagram,
}

impl GraphicType {
    pub const ALL: [GraphicType; 6] = [
        GraphicType::Illustration,
        GraphicType::Ornament,
        GraphicType::Initial,
        GraphicType::Border,
        GraphicType::Vignette,
        GraphicType::Diagram,
    ];

    /// Returns the two-letter code.
    pub fn code(self) -> &'static str {
        match self {
            GraphicType::Illustration => "IL",
            GraphicType::Ornament => "OR",
            GraphicType::Initial => "IN",
            GraphicType::Border => "BD",
            GraphicType::Vignette => "VG",
            GraphicType::Diagram => "DG",
        }
    }

    /// Looks up a graphic type by its code. Codes are case-sensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

impl fmt::Display for GraphicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A validated catalogue identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// A single page, `FN-PG-P1-12`.
    Page(PageRef),
    /// Several pages, possibly across parts, `FN-PG-P1-01-03, P2-07`.
    PageRange(PageRange),
    /// The transcription of a page, `FN-TR-P1-12`.
    Transcription(PageRef),
    /// The translation of a page, `FN-TL-P1-12-EN`.
    Translation {
        page: PageRef,
        language: LanguageCode,
    },
    /// A font, `FN-F-01`.
    Font(FontIndex),
    /// A glyph of a catalogued font, `FN-FG-01-0001`.
    Glyph { font: FontIndex, glyph: GlyphId },
    /// A graphic, `FN-GR-IL-01`.
    Graphic {
        kind: GraphicType,
        index: GraphicIndex,
    },
    /// A page layout, `FN-L-01`.
    Layout(LayoutIndex),
}

impl Identifier {
    /// Returns the category this identifier belongs to.
    pub fn category(&self) -> Category {
        match self {
            Identifier::Page(_) | Identifier::PageRange(_) => Category::Page,
            Identifier::Transcription(_) => Category::Transcription,
            Identifier::Translation { .. } => Category::Translation,
            Identifier::Font(_) => Category::Font,
            Identifier::Glyph { .. } => Category::Glyph,
            Identifier::Graphic { .. } => Category::Graphic,
            Identifier::Layout(_) => Category::Layout,
        }
    }

    /// Expands the pages this identifier denotes.
    ///
    /// Page ranges are expanded with [`PageRange::expand`]; transcriptions
    /// and translations denote the single page they refer to. Returns `None`
    /// for categories that do not refer to pages.
    pub fn pages(&self) -> Option<Vec<PageRef>> {
        match self {
            Identifier::Page(page)
            | Identifier::Transcription(page)
            | Identifier::Translation { page, .. } => Some(vec![*page]),
            Identifier::PageRange(range) => Some(range.expand()),
            Identifier::Font(_)
            | Identifier::Glyph { .. }
            | Identifier::Graphic { .. }
            | Identifier::Layout(_) => None,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let category = self.category();
        match self {
            Identifier::PageRange(range) => write!(f, "{range}"),
            Identifier::Page(page) | Identifier::Transcription(page) => {
                write!(f, "{PREFIX}-{category}-{page}")
            }
            Identifier::Translation { page, language } => {
                write!(f, "{PREFIX}-{category}-{page}-{language}")
            }
            Identifier::Font(font) => write!(f, "{PREFIX}-{category}-{font}"),
            Identifier::Glyph { font, glyph } => write!(f, "{PREFIX}-{category}-{font}-{glyph}"),
            Identifier::Graphic { kind, index } => write!(f, "{PREFIX}-{category}-{kind}-{index}"),
            Identifier::Layout(layout) => write!(f, "{PREFIX}-{category}-{layout}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::{PageNumber, PartCode};

    fn page(part: PartCode, page: u16) -> PageRef {
        PageRef::new(part, PageNumber::new(page).unwrap())
    }

    #[test]
    fn test_category_codes() {
        for category in Category::ALL {
            assert_eq!(Category::from_code(category.code()), Some(category));
        }
        assert_eq!(Category::from_code("pg"), None);
        assert_eq!(Category::from_code("XX"), None);
    }

    #[test]
    fn test_graphic_type_codes() {
        for kind in GraphicType::ALL {
            assert_eq!(GraphicType::from_code(kind.code()), Some(kind));
        }
        assert_eq!(GraphicType::from_code("il"), None);
        assert_eq!(GraphicType::from_code("ZZ"), None);
    }

    #[test]
    fn test_display() {
        let cases = [
            (Identifier::Page(page(PartCode::P1, 12)), "FN-PG-P1-12"),
            (
                Identifier::Transcription(page(PartCode::P2, 3)),
                "FN-TR-P2-03",
            ),
            (
                Identifier::Translation {
                    page: page(PartCode::P1, 12),
                    language: LanguageCode::new("en").unwrap(),
                },
                "FN-TL-P1-12-EN",
            ),
            (Identifier::Font(FontIndex::new(1).unwrap()), "FN-F-01"),
            (
                Identifier::Glyph {
                    font: FontIndex::new(1).unwrap(),
                    glyph: GlyphId::new(1).unwrap(),
                },
                "FN-FG-01-0001",
            ),
            (
                Identifier::Graphic {
                    kind: GraphicType::Illustration,
                    index: GraphicIndex::new(4).unwrap(),
                },
                "FN-GR-IL-04",
            ),
            (Identifier::Layout(LayoutIndex::new(2).unwrap()), "FN-L-02"),
        ];

        for (identifier, expected) in cases {
            assert_eq!(identifier.to_string(), expected);
        }
    }

    #[test]
    fn test_pages_for_non_page_categories() {
        assert!(Identifier::Font(FontIndex::new(1).unwrap()).pages().is_none());

        let translation = Identifier::Translation {
            page: page(PartCode::P3, 1),
            language: LanguageCode::new("de").unwrap(),
        };
        assert_eq!(translation.pages(), Some(vec![page(PartCode::P3, 1)]));
    }
}
