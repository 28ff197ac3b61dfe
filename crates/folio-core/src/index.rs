//! Fixed-width, 1-based numeric identifier fields.
//!
//! Every number that appears in a catalogue identifier has a fixed textual
//! width mandated by its category: pages, fonts, graphics and layouts use two
//! digits, glyph ids use four. Values are always at least `1`, and the
//! zero-padded rendering is the canonical form.
//!
//! # Example
//!
//! ```
//! # use folio_core::index::{GlyphId, PageNumber};
//! let page = PageNumber::new(7).unwrap();
//! assert_eq!(page.to_string(), "07");
//!
//! let glyph = GlyphId::new(42).unwrap();
//! assert_eq!(glyph.to_string(), "0042");
//!
//! assert!(PageNumber::new(0).is_none());
//! assert!(PageNumber::new(100).is_none());
//! ```

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Error returned when a raw value does not fit a fixed-width field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} must be between 1 and {max}, got {value}")]
pub struct IndexOutOfRange {
    /// Human readable name of the field.
    pub kind: &'static str,
    /// The rejected value.
    pub value: u16,
    /// The largest accepted value.
    pub max: u16,
}

macro_rules! fixed_width_index {
    ($(#[$meta:meta])* $name:ident, $kind:literal, width = $width:literal, max = $max:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
        #[serde(try_from = "u16")]
        pub struct $name(u16);

        impl $name {
            /// Number of digits in the canonical textual form.
            pub const WIDTH: usize = $width;

            /// Largest representable value.
            pub const MAX: u16 = $max;

            /// Creates a value, returning `None` if it is zero or too large.
            pub fn new(value: u16) -> Option<Self> {
                (1..=Self::MAX).contains(&value).then_some(Self(value))
            }

            /// Returns the numeric value (always >= 1).
            pub fn get(self) -> u16 {
                self.0
            }
        }

        impl TryFrom<u16> for $name {
            type Error = IndexOutOfRange;

            fn try_from(value: u16) -> Result<Self, Self::Error> {
                Self::new(value).ok_or(IndexOutOfRange {
                    kind: $kind,
                    value,
                    max: Self::MAX,
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:0width$}", self.0, width = Self::WIDTH)
            }
        }
    };
}

fixed_width_index!(
    /// A page number within a part, `01` to `99`.
    PageNumber, "page number", width = 2, max = 99
);

fixed_width_index!(
    /// Index of a catalogued font, `01` to `99`.
    FontIndex, "font index", width = 2, max = 99
);

fixed_width_index!(
    /// Index of a glyph within its font, `0001` to `9999`.
    GlyphId, "glyph id", width = 4, max = 9999
);

fixed_width_index!(
    /// Index of a graphic within its type, `01` to `99`.
    GraphicIndex, "graphic index", width = 2, max = 99
);

fixed_width_index!(
    /// Index of a page layout, `01` to `99`.
    LayoutIndex, "layout index", width = 2, max = 99
);

impl PageNumber {
    /// Returns the following page, or `None` after `99`.
    pub fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }
}
