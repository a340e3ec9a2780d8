use solverscope::discovery::{candidate_logs, FALLBACK_LOGS};
use solverscope::{AnalyzerConfig, AnalyzerError, LogAnalyzer};
use std::path::{Path, PathBuf};

const STATS: &str = "[Stats] Total: 10 | Vitesse: 5 clés/s | Instantané: 5 clés/s | Temps: 0:00:02 | Cœurs: 1\n";

#[test]
fn requested_log_comes_first_without_duplicates() {
    let c = candidate_logs(Path::new("solver.log"));
    let names: Vec<&str> = c.iter().map(|p| p.to_str().unwrap()).collect();
    assert_eq!(names, vec!["solver.log", "output.log", "bitcoin_solver.log"]);

    let c = candidate_logs(Path::new("custom.log"));
    assert_eq!(c.len(), 1 + FALLBACK_LOGS.len());
    assert_eq!(c[0], PathBuf::from("custom.log"));
}

#[test]
fn first_existing_candidate_is_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("solver.log");
    let present = dir.path().join("output.log");
    let later = dir.path().join("bitcoin_solver.log");
    std::fs::write(&present, STATS).unwrap();
    std::fs::write(&later, STATS.repeat(3)).unwrap();

    let mut analyzer = LogAnalyzer::new(AnalyzerConfig::default());
    let used = analyzer.parse_first_available(&[missing, present.clone(), later]).unwrap();
    assert_eq!(used, present);
    assert_eq!(analyzer.samples().len(), 1);
}

#[test]
fn no_candidate_found_lists_all_names() {
    let dir = tempfile::tempdir().unwrap();
    let candidates = vec![dir.path().join("a.log"), dir.path().join("b.log")];
    let mut analyzer = LogAnalyzer::new(AnalyzerConfig::default());
    match analyzer.parse_first_available(&candidates) {
        Err(AnalyzerError::NoLogFound { candidates: listed }) => assert_eq!(listed, candidates),
        other => panic!("expected NoLogFound, got {other:?}"),
    }
}

#[test]
fn empty_log_parses_without_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("solver.log");
    std::fs::write(&path, "").unwrap();
    let mut analyzer = LogAnalyzer::new(AnalyzerConfig::default());
    let counts = analyzer.parse_log_file(&path).unwrap();
    assert_eq!((counts.samples, counts.found_keys), (0, 0));
    assert!(analyzer.statistics().is_none());
}
