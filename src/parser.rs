use crate::error::AnalyzerError;
use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One periodic `[Stats]` line emitted by the solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatSample {
    /// Synthesized from the analysis clock, not read from the log.
    pub timestamp: DateTime<Utc>,
    pub total_keys: u64,
    pub avg_speed: f64,
    pub instant_speed: f64,
    pub elapsed_seconds: u64,
    pub cores: u32,
}

/// A solved key block as printed by the solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundKey {
    pub address: String,
    pub wif: String,
    pub decimal: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLog {
    pub samples: Vec<StatSample>,
    pub found_keys: Vec<FoundKey>,
}

static RE_STATS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\[Stats\] Total: (\d+) \| Vitesse: ([\d.]+) clés/s \| Instantané: ([\d.]+) clés/s \| Temps: (\d+):(\d+):(\d+) \| Cœurs: (\d+)",
    )
    .unwrap()
});

// Spans several lines; `.*?` keeps each block from swallowing the next one.
static RE_FOUND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)💰 ADRESSE TROUVÉE ! 💰.*?🔍 Adresse: ([^\n]+).*?🔑 Clé Privée \(WIF\): ([^\n]+).*?🔢 Nombre Décimal: ([^\n]+)",
    )
    .unwrap()
});

/// `None` when the total does not fit in a `u64`.
pub fn hms_to_seconds(hours: u64, minutes: u64, seconds: u64) -> Option<u64> {
    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}

/// Extract both record kinds from `text`, numbering samples from zero.
pub fn parse_text(text: &str, now: DateTime<Utc>, sample_interval: Duration) -> ParsedLog {
    ParsedLog {
        samples: extract_samples(text, now, sample_interval, 0),
        found_keys: extract_found_keys(text, now),
    }
}

/// Samples are timestamped `now - (first_index + i) * sample_interval`, so a
/// caller appending to an existing list passes its current length.
pub fn extract_samples(
    text: &str,
    now: DateTime<Utc>,
    sample_interval: Duration,
    first_index: usize,
) -> Vec<StatSample> {
    let mut out = Vec::new();
    for caps in RE_STATS.captures_iter(text) {
        let sample = synthesized_timestamp(now, sample_interval, first_index + out.len())
            .and_then(|ts| sample_from_captures(&caps, ts));
        match sample {
            Some(sample) => out.push(sample),
            None => log::debug!("skipping stats line with out-of-range field: {}", &caps[0]),
        }
    }
    out
}

/// `None` once the offset leaves chrono's representable range.
fn synthesized_timestamp(now: DateTime<Utc>, interval: Duration, index: usize) -> Option<DateTime<Utc>> {
    let offset = interval.checked_mul(i32::try_from(index).ok()?)?;
    now.checked_sub_signed(offset)
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

fn sample_from_captures(caps: &Captures<'_>, timestamp: DateTime<Utc>) -> Option<StatSample> {
    let elapsed_seconds = hms_to_seconds(
        caps[4].parse().ok()?,
        caps[5].parse().ok()?,
        caps[6].parse().ok()?,
    )?;
    Some(StatSample {
        timestamp,
        total_keys: caps[1].parse().ok()?,
        avg_speed: finite(caps[2].parse().ok()?)?,
        instant_speed: finite(caps[3].parse().ok()?)?,
        elapsed_seconds,
        cores: caps[7].parse().ok()?,
    })
}

pub fn extract_found_keys(text: &str, now: DateTime<Utc>) -> Vec<FoundKey> {
    RE_FOUND
        .captures_iter(text)
        .map(|caps| FoundKey {
            address: caps[1].trim().to_string(),
            wif: caps[2].trim().to_string(),
            decimal: caps[3].trim().to_string(),
            timestamp: now,
        })
        .collect()
}

/// Read a log file, decoding invalid UTF-8 lossily. Malformed content is the
/// pattern matcher's problem, not an I/O error.
pub fn read_log(path: &Path) -> Result<String, AnalyzerError> {
    let bytes = std::fs::read(path).map_err(|e| AnalyzerError::read(path, e))?;
    Ok(match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("{} is not valid UTF-8; decoding lossily", path.display());
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}
