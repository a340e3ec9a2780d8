use std::fmt;

pub const DEFAULT_PUZZLE_WIDTHS: [u32; 4] = [64, 66, 68, 70];

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const YEAR: f64 = 31_536_000.0;

/// Expected time to sweep a puzzle's key interval at the observed mean rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub width: u32,
    pub keyspace: u128,
    pub seconds: f64,
}

/// Size of the interval `[2^(w-1), 2^w - 1]`, i.e. `2^w - 2^(w-1)`.
///
/// The difference collapses to `2^(w-1)`, which keeps width 128 in range.
pub fn search_space(width: u32) -> Option<u128> {
    if width == 0 {
        return None;
    }
    1u128.checked_shl(width - 1)
}

/// On average the key sits in the first half of the interval, hence the
/// `rate * 2` divisor. A non-positive or non-finite rate yields `None`.
pub fn estimate(width: u32, mean_rate: f64) -> Option<Estimate> {
    if !mean_rate.is_finite() || mean_rate <= 0.0 {
        return None;
    }
    let keyspace = search_space(width)?;
    Some(Estimate {
        width,
        keyspace,
        seconds: keyspace as f64 / (mean_rate * 2.0),
    })
}

pub fn estimate_all(widths: &[u32], mean_rate: f64) -> Vec<Estimate> {
    widths.iter().filter_map(|&w| estimate(w, mean_rate)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
    Years,
}

impl TimeUnit {
    pub fn for_seconds(seconds: f64) -> Self {
        if seconds < HOUR {
            TimeUnit::Minutes
        } else if seconds < DAY {
            TimeUnit::Hours
        } else if seconds < YEAR {
            TimeUnit::Days
        } else {
            TimeUnit::Years
        }
    }

    fn seconds_per_unit(self) -> f64 {
        match self {
            TimeUnit::Minutes => MINUTE,
            TimeUnit::Hours => HOUR,
            TimeUnit::Days => DAY,
            TimeUnit::Years => YEAR,
        }
    }

    fn label(self) -> &'static str {
        match self {
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
            TimeUnit::Years => "years",
        }
    }
}

/// Render seconds in the largest bracket they reach, one decimal place.
pub fn format_duration(seconds: f64) -> String {
    let unit = TimeUnit::for_seconds(seconds);
    format!("{:.1} {}", seconds / unit.seconds_per_unit(), unit.label())
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Puzzle {}: ~{} (space: 2^{} keys)",
            self.width,
            format_duration(self.seconds),
            self.width - 1
        )
    }
}
