use crate::error::AnalyzerError;
use crate::parser::FoundKey;
use crate::stats::{group_thousands, Statistics};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::path::Path;

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; margin: 20px; }
    .header { background: linear-gradient(45deg, #f39c12, #e67e22); color: white; padding: 20px; border-radius: 10px; }
    .section { margin: 20px 0; padding: 15px; border-left: 4px solid #3498db; background: #f8f9fa; }
    .stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 15px; }
    .stat-card { background: white; padding: 15px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
    .found-key { background: #d4edda; padding: 10px; margin: 10px 0; border-radius: 5px; border-left: 4px solid #28a745; }
"#;

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn stat_card(html: &mut String, title: &str, value: &str, unit: &str) {
    let _ = write!(
        html,
        "      <div class=\"stat-card\">\n        <h3>{title}</h3>\n        <p><strong>{value}</strong>{unit}</p>\n      </div>\n"
    );
}

/// Static report: summary cards when samples exist, one block per found key.
pub fn render_report(
    stats: Option<&Statistics>,
    found_keys: &[FoundKey],
    generated_at: DateTime<Utc>,
) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"utf-8\">\n  <title>Key Search Solver - Analysis Report</title>\n  <style>{STYLE}  </style>\n</head>\n<body>\n"
    );
    let _ = write!(
        html,
        "  <div class=\"header\">\n    <h1>Key Search Solver - Analysis Report</h1>\n    <p>Generated: {} UTC</p>\n  </div>\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );

    html.push_str("  <div class=\"section\">\n    <h2>General Statistics</h2>\n    <div class=\"stats\">\n");
    if let Some(s) = stats {
        stat_card(&mut html, "Keys Tested", &group_thousands(s.total_keys), "");
        stat_card(&mut html, "Mean Speed", &format!("{:.2}", s.mean_speed), " keys/s");
        stat_card(&mut html, "Max Speed", &format!("{:.2}", s.max_speed), " keys/s");
        stat_card(&mut html, "Run Time", &s.elapsed_seconds.to_string(), " seconds");
    }
    html.push_str("    </div>\n  </div>\n");

    if !found_keys.is_empty() {
        html.push_str("  <div class=\"section\">\n    <h2>Found Keys</h2>\n");
        for key in found_keys {
            let _ = write!(
                html,
                "    <div class=\"found-key\">\n      <h4>Address: {}</h4>\n      <p><strong>WIF:</strong> {}</p>\n      <p><strong>Decimal:</strong> {}</p>\n    </div>\n",
                escape_html(&key.address),
                escape_html(&key.wif),
                escape_html(&key.decimal)
            );
        }
        html.push_str("  </div>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

pub fn write_report(
    path: &Path,
    stats: Option<&Statistics>,
    found_keys: &[FoundKey],
    generated_at: DateTime<Utc>,
) -> Result<(), AnalyzerError> {
    let html = render_report(stats, found_keys, generated_at);
    std::fs::write(path, html).map_err(|e| AnalyzerError::io(path, e))?;
    log::info!("html report written to {}", path.display());
    Ok(())
}
