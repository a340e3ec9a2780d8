use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("log file not found: {}", path.display())]
    LogNotFound { path: PathBuf },
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("charting support not compiled in (enable the `charts` feature)")]
    ChartingUnavailable,
    #[error("chart rendering failed: {0}")]
    Chart(String),
    #[error("no log file found among {} candidates", candidates.len())]
    NoLogFound { candidates: Vec<PathBuf> },
}

impl AnalyzerError {
    /// Read failures on a missing file collapse into `LogNotFound`.
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            AnalyzerError::LogNotFound { path }
        } else {
            AnalyzerError::Io { path, source }
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalyzerError::Io { path: path.into(), source }
    }
}
