//! Configuration types for the identifier engine.
//!
//! The configuration supplies the lookup data validation depends on: which
//! fonts have been catalogued and which translation languages are accepted.
//! All types implement [`serde::Deserialize`] for loading from external
//! sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`CatalogueConfig`] - The catalogued fonts glyph identifiers may refer to.
//! - [`LanguageConfig`] - The accepted translation languages.
//!
//! # Example
//!
//! ```
//! # use folio::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.catalogue().fonts().is_empty());
//! assert!(config.languages().codes().is_empty());
//! ```

use serde::Deserialize;

use folio_core::{index::FontIndex, language::LanguageCode};

/// Top-level configuration.
///
/// In TOML:
///
/// ```toml
/// [catalogue]
/// fonts = [1, 2, 5]
///
/// [languages]
/// codes = ["en", "de", "la"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Catalogue configuration section.
    #[serde(default)]
    catalogue: CatalogueConfig,

    /// Language configuration section.
    #[serde(default)]
    languages: LanguageConfig,
}

impl AppConfig {
    pub fn new(catalogue: CatalogueConfig, languages: LanguageConfig) -> Self {
        Self {
            catalogue,
            languages,
        }
    }

    /// Returns the catalogue configuration.
    pub fn catalogue(&self) -> &CatalogueConfig {
        &self.catalogue
    }

    /// Returns the language configuration.
    pub fn languages(&self) -> &LanguageConfig {
        &self.languages
    }
}

/// The catalogued fonts.
///
/// Glyph identifiers (`FN-FG-…`) only validate if their font is listed here.
/// Font identifiers themselves (`FN-F-…`) are never looked up.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CatalogueConfig {
    #[serde(default)]
    fonts: Vec<FontIndex>,
}

impl CatalogueConfig {
    pub fn new(fonts: Vec<FontIndex>) -> Self {
        Self { fonts }
    }

    /// Returns the catalogued font indices, in configuration order.
    pub fn fonts(&self) -> &[FontIndex] {
        &self.fonts
    }
}

/// The translation languages accepted in `FN-TL-…` identifiers.
///
/// An empty list accepts every ISO 639-1 language. A non-empty list
/// restricts translations to the listed codes, each of which must itself be
/// an ISO 639-1 code.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LanguageConfig {
    #[serde(default)]
    codes: Vec<LanguageCode>,
}

impl LanguageConfig {
    pub fn new(codes: Vec<LanguageCode>) -> Self {
        Self { codes }
    }

    pub fn codes(&self) -> &[LanguageCode] {
        &self.codes
    }
}
