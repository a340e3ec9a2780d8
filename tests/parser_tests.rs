use chrono::{Duration, TimeZone, Utc};
use solverscope::parser::{hms_to_seconds, parse_text, read_log};
use solverscope::{AnalyzerConfig, AnalyzerError, LogAnalyzer};

fn stats_line(total: u64, avg: &str, inst: &str, hms: &str, cores: u32) -> String {
    format!(
        "📊 [Stats] Total: {total} | Vitesse: {avg} clés/s | Instantané: {inst} clés/s | Temps: {hms} | Cœurs: {cores}"
    )
}

fn found_block(address: &str, wif: &str, decimal: &str) -> String {
    format!(
        "\n🎉 ==========================================\n\
         💰 ADRESSE TROUVÉE ! 💰\n\
         🔍 Adresse: {address}\n\
         🔑 Clé Privée (WIF): {wif}\n\
         🔢 Nombre Décimal: {decimal}\n\
         🏭 Core: 3\n\
         ⚡ Vitesse: 1234.00 clés/s\n\
         ==========================================\n"
    )
}

#[test]
fn counts_match_well_formed_lines_and_blocks() {
    let mut log = String::new();
    log.push_str("solver starting up\n");
    for i in 0..5u64 {
        log.push_str(&stats_line(1000 * (i + 1), "1500.5", "1499", "0:00:05", 8));
        log.push('\n');
        log.push_str("unrelated chatter\n");
    }
    log.push_str(&found_block("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH", "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn", "1"));
    log.push_str(&stats_line(6000, "1500", "1500", "0:00:06", 8));
    log.push_str(&found_block("1CUNEBjYrCn2y1SdiUMohaKUi4wpP326Lb", "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU74sHUHy8S", "3"));

    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let parsed = parse_text(&log, now, Duration::seconds(10));
    assert_eq!(parsed.samples.len(), 6);
    assert_eq!(parsed.found_keys.len(), 2);
}

#[test]
fn stats_fields_are_extracted() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let parsed = parse_text(&stats_line(123456, "2500.75", "2400.25", "1:02:03", 12), now, Duration::seconds(10));
    let s = &parsed.samples[0];
    assert_eq!(s.total_keys, 123456);
    assert_eq!(s.avg_speed, 2500.75);
    assert_eq!(s.instant_speed, 2400.25);
    assert_eq!(s.elapsed_seconds, 3723);
    assert_eq!(s.cores, 12);
}

#[test]
fn elapsed_conversion() {
    assert_eq!(hms_to_seconds(1, 2, 3), Some(3723));
    assert_eq!(hms_to_seconds(0, 0, 0), Some(0));
    assert_eq!(hms_to_seconds(u64::MAX, 0, 0), None);
}

#[test]
fn timestamps_step_back_per_sample() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let log = [
        stats_line(1, "1", "1", "0:00:01", 1),
        stats_line(2, "1", "1", "0:00:02", 1),
        stats_line(3, "1", "1", "0:00:03", 1),
    ]
    .join("\n");
    let parsed = parse_text(&log, now, Duration::seconds(10));
    let ts: Vec<_> = parsed.samples.iter().map(|s| s.timestamp).collect();
    assert_eq!(ts, vec![now, now - Duration::seconds(10), now - Duration::seconds(20)]);
}

#[test]
fn found_key_fields_are_trimmed() {
    let now = Utc::now();
    let block = found_block("  1Addr  ", "KwifValue\r", " 42 ");
    let parsed = parse_text(&block, now, Duration::seconds(10));
    assert_eq!(parsed.found_keys.len(), 1);
    let k = &parsed.found_keys[0];
    assert_eq!(k.address, "1Addr");
    assert_eq!(k.wif, "KwifValue");
    assert_eq!(k.decimal, "42");
    assert_eq!(k.timestamp, now);
}

#[test]
fn near_miss_lines_are_ignored() {
    let now = Utc::now();
    // Solver builds without the core counter print this shorter form.
    let log = "📊 [Stats] Total: 10 | Vitesse: 5 clés/s | Instantané: 5 clés/s | Temps: 0:00:02\n\
               [Stats] Total: abc | Vitesse: 5 clés/s\n\
               💰 ADRESSE TROUVÉE ! 💰\n🔍 Adresse: 1Only\n";
    let parsed = parse_text(log, now, Duration::seconds(10));
    assert!(parsed.samples.is_empty());
    assert!(parsed.found_keys.is_empty());
}

#[test]
fn analyzer_appends_and_keeps_numbering() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let mut analyzer = LogAnalyzer::new(AnalyzerConfig::default());
    let first = analyzer.parse_text_at(&stats_line(1, "1", "1", "0:00:01", 1), now);
    let second = analyzer.parse_text_at(&stats_line(2, "2", "2", "0:00:02", 1), now);
    assert_eq!(first.samples, 1);
    assert_eq!(second.samples, 1);
    assert_eq!(analyzer.samples().len(), 2);
    assert_eq!(analyzer.samples()[1].timestamp, now - Duration::seconds(10));
}

#[test]
fn read_log_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_log(&dir.path().join("absent.log")).unwrap_err();
    assert!(matches!(err, AnalyzerError::LogNotFound { .. }));
}

#[test]
fn read_log_tolerates_invalid_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("solver.log");
    let mut bytes = vec![0xff, 0xfe, b'\n'];
    bytes.extend_from_slice(stats_line(7, "3", "3", "0:00:07", 2).as_bytes());
    std::fs::write(&path, bytes).unwrap();

    let mut analyzer = LogAnalyzer::new(AnalyzerConfig::default());
    let counts = analyzer.parse_log_file(&path).unwrap();
    assert_eq!(counts.samples, 1);
    assert_eq!(analyzer.samples()[0].total_keys, 7);
}

#[test]
fn huge_sample_interval_does_not_panic() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let config = AnalyzerConfig { sample_interval: Duration::seconds(i64::from(u32::MAX)), ..AnalyzerConfig::default() };
    let mut analyzer = LogAnalyzer::new(config);
    let log = format!("{}\n", stats_line(1, "1", "1", "0:00:01", 1)).repeat(3000);
    let counts = analyzer.parse_text_at(&log, now);
    assert!(counts.samples > 0 && counts.samples < 3000);
    assert!(analyzer.samples().iter().all(|s| s.timestamp <= now));
}
