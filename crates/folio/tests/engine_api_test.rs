//! Integration tests for the IdentifierEngine API

use folio::{
    IdentifierEngine,
    batch::Outcome,
    config::{AppConfig, CatalogueConfig, LanguageConfig},
    index::FontIndex,
};

fn catalogued_engine() -> IdentifierEngine {
    let config = AppConfig::new(
        CatalogueConfig::new([1, 2].into_iter().filter_map(FontIndex::new).collect()),
        LanguageConfig::default(),
    );
    IdentifierEngine::new(config).expect("Config should be valid")
}

#[test]
fn test_batch_continues_past_failures() {
    let text = "\
# pages of the first gathering
FN-PG-P1-01-03, 05

FN-PG-P1-01-03-05
FN-TL-P1-12-XX
  FN-FG-01-0001
FN-PG-P1-01, 02
";
    let report = catalogued_engine().check_batch(text);

    let lines: Vec<usize> = report.lines().iter().map(|line| line.line()).collect();
    assert_eq!(lines, vec![2, 4, 5, 6, 7]);

    assert_eq!(report.failures(), 2);
    assert_eq!(report.warnings(), 1);
    assert!(report.has_failures());

    assert!(matches!(report.lines()[0].outcome(), Outcome::Valid(_)));
    assert!(report.lines()[1].is_invalid());
    assert_eq!(report.lines()[3].source(), "FN-FG-01-0001");
    assert!(matches!(
        report.lines()[4].outcome(),
        Outcome::NonCanonical { .. }
    ));
}

#[test]
fn test_batch_diagnostics() {
    let report = catalogued_engine().check_batch("FN-PG-P1-01, P1-03\nFN-PG-P1-01, 02\n");

    let error = report.lines()[0].diagnostic().expect("Should report an error");
    assert!(error.severity().is_error());
    assert_eq!(error.labels().len(), 2);

    let warning = report.lines()[1].diagnostic().expect("Should report a warning");
    assert!(warning.severity().is_warning());
    assert_eq!(warning.help(), Some("write `FN-PG-P1-01-02`"));
}

#[test]
fn test_empty_batch() {
    let report = IdentifierEngine::default().check_batch("# nothing here\n\n");
    assert!(report.lines().is_empty());
    assert!(!report.has_failures());
}

#[test]
fn test_engine_shared_across_threads() {
    let engine = catalogued_engine();
    let sources = [
        "FN-PG-P1-01-03, 05, P2-07, 09-11, P3-02",
        "FN-TR-P2-04",
        "FN-TL-P1-12-EN",
        "FN-FG-02-0100",
        "FN-GR-BD-02",
    ];

    let engine = &engine;
    std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|&source| scope.spawn(move || engine.parse(source).map(|id| id.to_string())))
            .collect();

        for (handle, source) in handles.into_iter().zip(sources) {
            let canonical = handle.join().expect("Thread should not panic");
            assert_eq!(canonical.ok().as_deref(), Some(source));
        }
    });
}

#[test]
fn test_normalize_across_identifiers() {
    let engine = IdentifierEngine::default();

    let range = engine
        .normalize(["FN-PG-P2-03", "FN-TR-P1-02", "FN-PG-P1-01, P2-02"])
        .expect("Should normalize");
    assert_eq!(range.to_string(), "FN-PG-P1-01-02, P2-02-03");
}
