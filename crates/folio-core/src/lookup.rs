//! Read-only lookup collaborators used during validation.
//!
//! The validator never owns catalogue state. Instead it is handed a language
//! table and a font catalogue through these traits, so callers can plug in
//! the built-in tables, configuration-driven sets or test fixtures.
//!
//! Both traits require `Send + Sync`: a table is built once and then shared
//! read-only by every caller, possibly from several threads.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::{index::FontIndex, language::LanguageCode};

/// Maps two-letter language codes to language names.
///
/// A missing key is an ordinary outcome, not a fault.
pub trait LanguageTable: Send + Sync {
    /// Returns the language name for `code`, if the code is known.
    fn language_name(&self, code: LanguageCode) -> Option<&str>;

    /// Returns `true` if `code` is known.
    fn contains(&self, code: LanguageCode) -> bool {
        self.language_name(code).is_some()
    }
}

/// The set of fonts known to the catalogue.
pub trait FontCatalogue: Send + Sync {
    /// Returns `true` if a font with this index has been catalogued.
    fn contains_font(&self, font: FontIndex) -> bool;
}

impl LanguageTable for BTreeMap<LanguageCode, String> {
    fn language_name(&self, code: LanguageCode) -> Option<&str> {
        self.get(&code).map(String::as_str)
    }
}

impl FontCatalogue for BTreeSet<FontIndex> {
    fn contains_font(&self, font: FontIndex) -> bool {
        self.contains(&font)
    }
}

impl FontCatalogue for HashSet<FontIndex> {
    fn contains_font(&self, font: FontIndex) -> bool {
        self.contains(&font)
    }
}

impl FontCatalogue for [FontIndex] {
    fn contains_font(&self, font: FontIndex) -> bool {
        self.contains(&font)
    }
}
