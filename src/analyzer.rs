use crate::chart;
use crate::error::AnalyzerError;
use crate::estimate::{self, Estimate, DEFAULT_PUZZLE_WIDTHS};
use crate::export::{self, AnalysisExport};
use crate::parser::{self, FoundKey, StatSample};
use crate::report;
use crate::stats::{self, Statistics};
use chrono::{DateTime, Duration, Utc};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Spacing between synthesized sample timestamps.
    pub sample_interval: Duration,
    pub puzzle_widths: Vec<u32>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sample_interval: Duration::seconds(10),
            puzzle_widths: DEFAULT_PUZZLE_WIDTHS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseCounts {
    pub samples: usize,
    pub found_keys: usize,
}

/// Output file names derived from a common prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub json: PathBuf,
    pub chart: PathBuf,
    pub report: PathBuf,
}

impl ArtifactPaths {
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            json: PathBuf::from(format!("{prefix}.json")),
            chart: PathBuf::from(format!("{prefix}_performance.png")),
            report: PathBuf::from(format!("{prefix}_report.html")),
        }
    }
}

/// Holds everything extracted from one or more solver logs. Records are
/// append-only; nothing is mutated once parsed.
#[derive(Debug, Clone, Default)]
pub struct LogAnalyzer {
    config: AnalyzerConfig,
    samples: Vec<StatSample>,
    found_keys: Vec<FoundKey>,
}

impl LogAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            samples: Vec::new(),
            found_keys: Vec::new(),
        }
    }

    pub fn samples(&self) -> &[StatSample] {
        &self.samples
    }

    pub fn found_keys(&self) -> &[FoundKey] {
        &self.found_keys
    }

    /// Extract records from `text` as if parsed at `now`.
    pub fn parse_text_at(&mut self, text: &str, now: DateTime<Utc>) -> ParseCounts {
        let samples = parser::extract_samples(text, now, self.config.sample_interval, self.samples.len());
        let found = parser::extract_found_keys(text, now);
        let counts = ParseCounts { samples: samples.len(), found_keys: found.len() };
        self.samples.extend(samples);
        self.found_keys.extend(found);
        counts
    }

    pub fn parse_log_file(&mut self, path: &Path) -> Result<ParseCounts, AnalyzerError> {
        log::info!("analyzing {}", path.display());
        let text = parser::read_log(path)?;
        let counts = self.parse_text_at(&text, Utc::now());
        log::info!("found {} stats entries", counts.samples);
        log::info!("found {} solved keys", counts.found_keys);
        Ok(counts)
    }

    /// Parse the first candidate that exists and can be read.
    pub fn parse_first_available(&mut self, candidates: &[PathBuf]) -> Result<PathBuf, AnalyzerError> {
        for path in candidates {
            if !path.exists() {
                log::debug!("{} does not exist, trying next candidate", path.display());
                continue;
            }
            match self.parse_log_file(path) {
                Ok(_) => return Ok(path.clone()),
                Err(e) => log::warn!("{e}"),
            }
        }
        Err(AnalyzerError::NoLogFound { candidates: candidates.to_vec() })
    }

    /// `None`, with a warning, when no samples were extracted.
    pub fn statistics(&self) -> Option<Statistics> {
        let stats = stats::compute_statistics(&self.samples);
        if stats.is_none() {
            log::warn!("no statistics data available");
        }
        stats
    }

    pub fn estimates(&self, stats: &Statistics) -> Vec<Estimate> {
        estimate::estimate_all(&self.config.puzzle_widths, stats.mean_speed)
    }

    pub fn export_at(&self, analysis_date: DateTime<Utc>) -> AnalysisExport {
        AnalysisExport {
            statistics: self.samples.clone(),
            found_keys: self.found_keys.clone(),
            analysis_date,
        }
    }

    pub fn export_results(&self, path: &Path) -> Result<(), AnalyzerError> {
        export::write_results(path, &self.export_at(Utc::now()))
    }

    /// `Ok(false)` when there was nothing to plot.
    pub fn create_performance_graph(&self, path: &Path) -> Result<bool, AnalyzerError> {
        chart::render_performance_chart(&self.samples, path)
    }

    pub fn generate_report(&self, path: &Path) -> Result<(), AnalyzerError> {
        let stats = stats::compute_statistics(&self.samples);
        report::write_report(path, stats.as_ref(), &self.found_keys, Utc::now())
    }
}
