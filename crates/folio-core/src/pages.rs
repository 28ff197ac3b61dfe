//! Page ranges: segments, expansion and normalization.
//!
//! A [`PageRange`] is the value behind a `FN-PG-…` identifier. It is an
//! ordered, non-empty list of [`Segment`]s, each covering a single page or an
//! inclusive span of pages within one part.
//!
//! Two operations connect the textual and the set view of a range:
//!
//! - [`PageRange::expand`] materializes the set of [`PageRef`]s a range
//!   denotes, merging duplicates and overlaps.
//! - [`normalize`] builds the most compact range for a set of pages; its
//!   [`Display`](std::fmt::Display) output is the canonical identifier text.
//!
//! # Example
//!
//! ```
//! # use folio_core::pages::normalize;
//! # use folio_core::part::{PageNumber, PageRef, PartCode};
//! let page = |part, n| PageRef::new(part, PageNumber::new(n).unwrap());
//!
//! let range = normalize([
//!     page(PartCode::P2, 7),
//!     page(PartCode::P1, 2),
//!     page(PartCode::P1, 1),
//!     page(PartCode::P1, 3),
//!     page(PartCode::P1, 5),
//! ])
//! .unwrap();
//!
//! assert_eq!(range.to_string(), "FN-PG-P1-01-03, 05, P2-07");
//! assert_eq!(range.expand().len(), 5);
//! ```

use std::{
    collections::{BTreeSet, HashSet},
    fmt,
};

use indexmap::IndexMap;
use log::trace;
use thiserror::Error;

use crate::{
    identifier::{Category, PREFIX},
    part::{PageNumber, PageRef, PartCode},
};

/// Errors raised when constructing a [`PageRange`] that breaks its invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRangeError {
    #[error("a page range needs at least one page")]
    Empty,

    #[error("span {start}-{end} must end after it starts")]
    InvalidSpan { start: PageNumber, end: PageNumber },

    #[error("part {0} is reopened after another part was stated")]
    PartReopened(PartCode),
}

/// A single page or an inclusive span of pages within one part.
///
/// Spans always satisfy `start < end`; a span with equal bounds is
/// represented as a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    part: PartCode,
    start: PageNumber,
    end: PageNumber,
}

impl Segment {
    /// Creates a single-page segment.
    pub fn single(part: PartCode, page: PageNumber) -> Self {
        Self {
            part,
            start: page,
            end: page,
        }
    }

    /// Creates a span segment. Fails unless `start < end`.
    pub fn span(part: PartCode, start: PageNumber, end: PageNumber) -> Result<Self, PageRangeError> {
        if start < end {
            Ok(Self { part, start, end })
        } else {
            Err(PageRangeError::InvalidSpan { start, end })
        }
    }

    pub fn part(&self) -> PartCode {
        self.part
    }

    /// First page covered by this segment.
    pub fn first(&self) -> PageNumber {
        self.start
    }

    /// Last page covered by this segment.
    pub fn last(&self) -> PageNumber {
        self.end
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Iterates over the pages of this segment in ascending order.
    pub fn pages(&self) -> impl Iterator<Item = PageNumber> + use<> {
        (self.start.get()..=self.end.get()).filter_map(PageNumber::new)
    }
}

/// Renders the page part only (`05` or `01-03`); the part marker belongs to
/// the enclosing range.
impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// An ordered, non-empty list of page segments.
///
/// Once a range moves on from a part it never returns to it, so the segments
/// of each part are contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageRange {
    segments: Vec<Segment>,
}

impl PageRange {
    /// Creates a page range from segments, checking its invariants.
    pub fn new(segments: Vec<Segment>) -> Result<Self, PageRangeError> {
        if segments.is_empty() {
            return Err(PageRangeError::Empty);
        }

        let mut closed = HashSet::new();
        for pair in segments.windows(2) {
            let (previous, current) = (pair[0].part, pair[1].part);
            if previous != current {
                closed.insert(previous);
                if closed.contains(&current) {
                    return Err(PageRangeError::PartReopened(current));
                }
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the page if this range denotes exactly one page.
    pub fn single_page(&self) -> Option<PageRef> {
        match self.segments.as_slice() {
            [segment] if segment.is_single() => Some(PageRef::new(segment.part, segment.start)),
            _ => None,
        }
    }

    /// Expands the range into the set of pages it denotes.
    ///
    /// Pages are grouped by part in the order the parts are first stated,
    /// sorted by page number within a part, with duplicates and overlapping
    /// segments merged.
    pub fn expand(&self) -> Vec<PageRef> {
        let mut parts: IndexMap<PartCode, BTreeSet<PageNumber>> = IndexMap::new();
        for segment in &self.segments {
            parts.entry(segment.part).or_default().extend(segment.pages());
        }

        let pages: Vec<PageRef> = parts
            .into_iter()
            .flat_map(|(part, pages)| pages.into_iter().map(move |page| PageRef::new(part, page)))
            .collect();

        trace!(segments = self.segments.len(), pages = pages.len(); "Expanded page range");
        pages
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}-{}-", Category::Page)?;

        let mut previous: Option<PartCode> = None;
        for segment in &self.segments {
            if previous.is_some() {
                f.write_str(", ")?;
            }
            if previous != Some(segment.part) {
                write!(f, "{}-", segment.part)?;
            }
            write!(f, "{segment}")?;
            previous = Some(segment.part);
        }
        Ok(())
    }
}

/// Builds the canonical, most compact page range for a set of pages.
///
/// Parts are emitted in ascending order and runs of consecutive pages within
/// a part collapse into spans. Input order and duplicates do not matter.
///
/// # Errors
///
/// Returns [`PageRangeError::Empty`] if `pages` is empty.
pub fn normalize(pages: impl IntoIterator<Item = PageRef>) -> Result<PageRange, PageRangeError> {
    let pages: BTreeSet<PageRef> = pages.into_iter().collect();

    let mut segments: Vec<Segment> = Vec::new();
    for page in &pages {
        match segments.last_mut() {
            Some(last)
                if last.part == page.part() && last.end.next() == Some(page.page()) =>
            {
                last.end = page.page();
            }
            _ => segments.push(Segment::single(page.part(), page.page())),
        }
    }

    trace!(pages = pages.len(), segments = segments.len(); "Normalized page set");
    PageRange::new(segments)
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Strategy for arbitrary sets of pages across all parts.
    fn page_set_strategy() -> impl Strategy<Value = Vec<PageRef>> {
        prop::collection::vec((0usize..3, 1u16..=99), 1..60).prop_map(|pairs| {
            pairs
                .into_iter()
                .filter_map(|(part, page)| {
                    PageNumber::new(page).map(|page| PageRef::new(PartCode::ALL[part], page))
                })
                .collect()
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Normalizing then expanding yields the sorted, deduplicated input set.
    fn check_normalize_expand_roundtrip(pages: &[PageRef]) -> Result<(), TestCaseError> {
        let range = normalize(pages.iter().copied()).expect("non-empty input");

        let expected: Vec<PageRef> = pages.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(range.expand(), expected);
        Ok(())
    }

    /// Normalizing an already normalized set changes nothing.
    fn check_normalize_idempotent(pages: &[PageRef]) -> Result<(), TestCaseError> {
        let once = normalize(pages.iter().copied()).expect("non-empty input");
        let twice = normalize(once.expand()).expect("non-empty input");

        prop_assert_eq!(once.to_string(), twice.to_string());
        prop_assert_eq!(once, twice);
        Ok(())
    }

    /// Adjacent segments of the same part are never mergeable.
    fn check_normalize_is_compact(pages: &[PageRef]) -> Result<(), TestCaseError> {
        let range = normalize(pages.iter().copied()).expect("non-empty input");

        for pair in range.segments().windows(2) {
            if pair[0].part() == pair[1].part() {
                prop_assert!(pair[0].last().next() != Some(pair[1].first()));
                prop_assert!(pair[0].last() < pair[1].first());
            } else {
                prop_assert!(pair[0].part() < pair[1].part());
            }
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn normalize_expand_roundtrip(pages in page_set_strategy()) {
            check_normalize_expand_roundtrip(&pages)?;
        }

        #[test]
        fn normalize_idempotent(pages in page_set_strategy()) {
            check_normalize_idempotent(&pages)?;
        }

        #[test]
        fn normalize_is_compact(pages in page_set_strategy()) {
            check_normalize_is_compact(&pages)?;
        }
    }
}
