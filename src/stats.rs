use crate::parser::StatSample;
use itertools::Itertools;
use std::fmt;

/// Aggregate view over a run's `[Stats]` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub sample_count: usize,
    pub total_keys: u64,
    pub mean_speed: f64,
    pub max_speed: f64,
    pub min_speed: f64,
    pub elapsed_seconds: u64,
    /// Core count reported by the most recent sample.
    pub cores: u32,
}

/// `None` for an empty sample list; nothing is computed in that case.
pub fn compute_statistics(samples: &[StatSample]) -> Option<Statistics> {
    let last = samples.last()?;
    let (min_speed, max_speed) = samples.iter().map(|s| s.avg_speed).minmax().into_option()?;
    let mean_speed = samples.iter().map(|s| s.avg_speed).sum::<f64>() / samples.len() as f64;
    Some(Statistics {
        sample_count: samples.len(),
        total_keys: samples.iter().map(|s| s.total_keys).max().unwrap_or(0),
        mean_speed,
        max_speed,
        min_speed,
        elapsed_seconds: samples.iter().map(|s| s.elapsed_seconds).max().unwrap_or(0),
        cores: last.cores,
    })
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total keys tested:   {}", group_thousands(self.total_keys))?;
        writeln!(f, "Mean speed:          {:.2} keys/s", self.mean_speed)?;
        writeln!(f, "Max speed:           {:.2} keys/s", self.max_speed)?;
        writeln!(f, "Min speed:           {:.2} keys/s", self.min_speed)?;
        writeln!(f, "Total run time:      {} seconds", self.elapsed_seconds)?;
        write!(f, "Cores in use:        {}", self.cores)
    }
}
