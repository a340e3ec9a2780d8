pub mod error;
pub mod parser;
pub mod stats;
pub mod estimate;
pub mod export;
pub mod chart;
pub mod report;
pub mod discovery;
pub mod analyzer;

pub use analyzer::{AnalyzerConfig, ArtifactPaths, LogAnalyzer, ParseCounts};
pub use error::AnalyzerError;
