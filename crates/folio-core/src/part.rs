//! Parts of the work and page references within them.

use std::fmt;

pub use crate::index::PageNumber;

/// One of the three parts (volumes) of the work.
///
/// Parts are ordered `P1 < P2 < P3`; canonical output always lists parts in
/// that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PartCode {
    P1,
    P2,
    P3,
}

impl PartCode {
    /// All parts in ascending order.
    pub const ALL: [PartCode; 3] = [PartCode::P1, PartCode::P2, PartCode::P3];

    /// Returns the part for a marker digit (`'1'`, `'2'` or `'3'`).
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(PartCode::P1),
            '2' => Some(PartCode::P2),
            '3' => Some(PartCode::P3),
            _ => None,
        }
    }

    /// Returns the marker text, e.g. `"P2"`.
    pub fn as_str(self) -> &'static str {
        match self {
            PartCode::P1 => "P1",
            PartCode::P2 => "P2",
            PartCode::P3 => "P3",
        }
    }
}

impl fmt::Display for PartCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single page of a single part: the `(PartCode, PageNumber)` pair.
///
/// Ordering is by part, then page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageRef {
    part: PartCode,
    page: PageNumber,
}

impl PageRef {
    pub fn new(part: PartCode, page: PageNumber) -> Self {
        Self { part, page }
    }

    pub fn part(self) -> PartCode {
        self.part
    }

    pub fn page(self) -> PageNumber {
        self.page
    }
}

impl From<(PartCode, PageNumber)> for PageRef {
    fn from((part, page): (PartCode, PageNumber)) -> Self {
        Self::new(part, page)
    }
}

/// Renders as `P1-05`, the form used inside identifiers.
impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.part, self.page)
    }
}
