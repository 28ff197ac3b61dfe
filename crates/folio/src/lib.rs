//! Folio - parsing and normalization of catalogue identifiers.
//!
//! Identifiers such as `FN-PG-P1-01-03, 05, P2-07` or `FN-TL-P1-12-EN` name
//! the pages, transcriptions, translations, fonts, glyphs, graphics and
//! layouts of a restored publication. This crate validates them against the
//! configured catalogue, expands page ranges and writes them back in
//! canonical form.

pub mod batch;
pub mod config;

mod error;

pub use folio_core::{identifier, index, language, pages, part};

pub use error::FolioError;

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info, trace};

use folio_core::{
    identifier::Identifier,
    index::FontIndex,
    language::Iso639,
    lookup::LanguageTable,
    pages::{PageRange, normalize},
    part::PageRef,
};
use folio_parser::{
    Span, ValidationContext,
    error::{Diagnostic, ErrorCode},
};

use batch::{BatchReport, CheckedLine, Outcome};
use config::AppConfig;

/// Engine for validating, expanding and normalizing identifiers.
///
/// The engine owns the lookup tables built from its configuration and is
/// read-only afterwards, so one engine can be shared across threads.
///
/// # Examples
///
/// ```
/// use folio::{IdentifierEngine, config::AppConfig};
///
/// let engine = IdentifierEngine::new(AppConfig::default())
///     .expect("Default config is valid");
///
/// let pages = engine.expand("FN-PG-P1-01-03, 05")
///     .expect("Failed to expand");
/// assert_eq!(pages.len(), 4);
///
/// let range = engine.normalize(["FN-PG-P1-02", "FN-PG-P1-01, 03"])
///     .expect("Failed to normalize");
/// assert_eq!(range.to_string(), "FN-PG-P1-01-03");
/// ```
pub struct IdentifierEngine {
    fonts: BTreeSet<FontIndex>,
    languages: Box<dyn LanguageTable>,
}

impl Default for IdentifierEngine {
    fn default() -> Self {
        Self {
            fonts: BTreeSet::new(),
            languages: Box::new(Iso639),
        }
    }
}

impl IdentifierEngine {
    /// Create an engine from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Config`] if a configured language code is not
    /// an ISO 639-1 code.
    pub fn new(config: AppConfig) -> Result<Self, FolioError> {
        let fonts: BTreeSet<FontIndex> = config.catalogue().fonts().iter().copied().collect();

        let codes = config.languages().codes();
        let languages: Box<dyn LanguageTable> = if codes.is_empty() {
            Box::new(Iso639)
        } else {
            let mut table = BTreeMap::new();
            for &code in codes {
                let name = Iso639.language_name(code).ok_or_else(|| {
                    FolioError::Config(format!("`{code}` is not an ISO 639-1 language code"))
                })?;
                table.insert(code, name.to_string());
            }
            Box::new(table)
        };

        info!(fonts = fonts.len(), languages = codes.len(); "Created identifier engine");
        Ok(Self { fonts, languages })
    }

    /// The lookups used to validate identifiers.
    pub fn validation_context(&self) -> ValidationContext<'_> {
        ValidationContext::new(&*self.languages, &self.fonts)
    }

    /// Parse and validate a single identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Identifier`] with the source text attached.
    pub fn parse(&self, source: &str) -> Result<Identifier, FolioError> {
        debug!(source; "Parsing identifier");

        let identifier = folio_parser::parse(source, &self.validation_context())
            .map_err(|err| FolioError::new_identifier_error(err, source))?;

        trace!(identifier:?; "Parsed identifier");
        Ok(identifier)
    }

    /// Expand an identifier into the pages it refers to.
    ///
    /// Page lists expand in declaration order of their parts; transcriptions
    /// and translations expand to their single page.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::NoPages`] for fonts, glyphs, graphics and
    /// layouts, and the parse error for invalid input.
    pub fn expand(&self, source: &str) -> Result<Vec<PageRef>, FolioError> {
        let identifier = self.parse(source)?;

        let pages = identifier.pages().ok_or_else(|| FolioError::NoPages {
            identifier: source.to_string(),
        })?;

        debug!(pages = pages.len(); "Expanded identifier");
        Ok(pages)
    }

    /// Merge the pages of all `sources` into one canonical page range.
    ///
    /// # Errors
    ///
    /// Returns the first expansion error, or [`FolioError::EmptyPageSet`]
    /// if `sources` is empty.
    pub fn normalize<I, S>(&self, sources: I) -> Result<PageRange, FolioError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pages = Vec::new();
        for source in sources {
            pages.extend(self.expand(source.as_ref())?);
        }

        let range = normalize(pages)?;
        debug!(segments = range.segments().len(); "Normalized pages");
        Ok(range)
    }

    /// Check every line of `text`, continuing past failures.
    ///
    /// Blank lines and lines starting with `#` are skipped. See
    /// [`batch`] for the report format.
    pub fn check_batch(&self, text: &str) -> BatchReport {
        let ctx = self.validation_context();

        let lines: Vec<CheckedLine> = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
            .map(|(line_number, source)| {
                let outcome = match folio_parser::parse(source, &ctx) {
                    Ok(identifier) => match canonical_warning(source, &identifier) {
                        Some(warning) => Outcome::NonCanonical {
                            identifier,
                            warning,
                        },
                        None => Outcome::Valid(identifier),
                    },
                    Err(err) => {
                        debug!(line = line_number, code:? = err.code(); "Invalid identifier");
                        Outcome::Invalid(err)
                    }
                };
                CheckedLine::new(line_number, source, outcome)
            })
            .collect();

        let report = BatchReport::new(lines);
        info!(
            lines = report.lines().len(),
            failures = report.failures(),
            warnings = report.warnings();
            "Checked batch"
        );
        report
    }
}

/// Rewrite an identifier into its canonical form.
///
/// Page lists are normalized: parts in ascending order, consecutive pages
/// merged into spans, and a list of one page becomes a single page. Every
/// other identifier is already canonical.
pub fn canonicalize(identifier: &Identifier) -> Identifier {
    let Identifier::PageRange(range) = identifier else {
        return identifier.clone();
    };

    match normalize(range.expand()) {
        Ok(range) => match range.single_page() {
            Some(page) => Identifier::Page(page),
            None => Identifier::PageRange(range),
        },
        Err(_) => identifier.clone(),
    }
}

/// A [`ErrorCode::W001`] warning if `source` differs from the canonical text
/// of `identifier`.
pub fn canonical_warning(source: &str, identifier: &Identifier) -> Option<Diagnostic> {
    let canonical = canonicalize(identifier).to_string();
    if canonical == source {
        return None;
    }

    Some(
        Diagnostic::warning("identifier is not in canonical form")
            .with_code(ErrorCode::W001)
            .with_label(Span::new(0..source.len()), format!("canonical form is `{canonical}`"))
            .with_help(format!("write `{canonical}`")),
    )
}

#[cfg(test)]
mod tests {
    use folio_core::{
        language::LanguageCode,
        part::{PageNumber, PartCode},
    };
    use folio_parser::error::{IdentifierError, ValidationError};

    use super::*;
    use crate::config::{CatalogueConfig, LanguageConfig};

    fn engine(fonts: &[u16], codes: &[&str]) -> IdentifierEngine {
        let config = AppConfig::new(
            CatalogueConfig::new(fonts.iter().copied().filter_map(FontIndex::new).collect()),
            LanguageConfig::new(codes.iter().filter_map(|c| LanguageCode::new(c)).collect()),
        );
        IdentifierEngine::new(config).unwrap()
    }

    fn parse_canonical(source: &str) -> String {
        let identifier = IdentifierEngine::default().parse(source).unwrap();
        canonicalize(&identifier).to_string()
    }

    #[test]
    fn test_canonicalize_page_lists() {
        assert_eq!(parse_canonical("FN-PG-P1-01, 02, 03"), "FN-PG-P1-01-03");
        assert_eq!(parse_canonical("FN-PG-P2-05, P1-01-02"), "FN-PG-P1-01-02, P2-05");
        assert_eq!(parse_canonical("FN-PG-P1-04, 04"), "FN-PG-P1-04");
        assert_eq!(parse_canonical("FN-TL-P1-12-de"), "FN-TL-P1-12-DE");
    }

    #[test]
    fn test_canonical_warning() {
        let identifier = IdentifierEngine::default().parse("FN-PG-P1-01,02").unwrap();

        let warning = canonical_warning("FN-PG-P1-01,02", &identifier).unwrap();
        assert!(warning.severity().is_warning());
        assert_eq!(warning.code(), Some(ErrorCode::W001));
        assert_eq!(warning.primary_span(), Some(Span::new(0..14)));

        let identifier = IdentifierEngine::default().parse("FN-PG-P1-01-02").unwrap();
        assert!(canonical_warning("FN-PG-P1-01-02", &identifier).is_none());
    }

    #[test]
    fn test_language_restriction() {
        let engine = engine(&[], &["en", "la"]);

        assert!(engine.parse("FN-TL-P1-01-LA").is_ok());
        assert!(matches!(
            engine.parse("FN-TL-P1-01-DE"),
            Err(FolioError::Identifier {
                err: IdentifierError::Validation(ValidationError::UnknownLanguage { .. }),
                ..
            })
        ));

        // Without a restriction every ISO 639-1 code is accepted.
        assert!(IdentifierEngine::default().parse("FN-TL-P1-01-DE").is_ok());
    }

    #[test]
    fn test_unknown_configured_language() {
        let config = AppConfig::new(
            CatalogueConfig::default(),
            LanguageConfig::new(vec![LanguageCode::new("xx").unwrap()]),
        );
        assert!(matches!(
            IdentifierEngine::new(config),
            Err(FolioError::Config(_))
        ));
    }

    #[test]
    fn test_glyphs_need_catalogued_fonts() {
        assert!(engine(&[3], &[]).parse("FN-FG-03-0007").is_ok());
        assert!(IdentifierEngine::default().parse("FN-FG-03-0007").is_err());
    }

    #[test]
    fn test_expand_non_page_identifier() {
        let err = IdentifierEngine::default().expand("FN-L-01").unwrap_err();
        assert!(matches!(err, FolioError::NoPages { .. }));
    }

    #[test]
    fn test_expand_transcription() {
        let pages = IdentifierEngine::default().expand("FN-TR-P3-08").unwrap();
        assert_eq!(
            pages,
            vec![PageRef::new(PartCode::P3, PageNumber::new(8).unwrap())]
        );
    }

    #[test]
    fn test_normalize_empty() {
        let sources: [&str; 0] = [];
        assert!(matches!(
            IdentifierEngine::default().normalize(sources),
            Err(FolioError::EmptyPageSet)
        ));
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let err = IdentifierEngine::default().parse("FN-PG-01").unwrap_err();
        let FolioError::Identifier { src, .. } = err else {
            panic!("expected an identifier error");
        };
        assert_eq!(src, "FN-PG-01");
    }
}
