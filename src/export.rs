use crate::error::AnalyzerError;
use crate::parser::{FoundKey, StatSample};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk snapshot of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisExport {
    pub statistics: Vec<StatSample>,
    pub found_keys: Vec<FoundKey>,
    pub analysis_date: DateTime<Utc>,
}

pub fn to_json(export: &AnalysisExport) -> Result<String, AnalyzerError> {
    Ok(serde_json::to_string_pretty(export)?)
}

pub fn write_results(path: &Path, export: &AnalysisExport) -> Result<(), AnalyzerError> {
    let body = to_json(export)?;
    std::fs::write(path, body).map_err(|e| AnalyzerError::io(path, e))?;
    log::info!("results exported to {}", path.display());
    Ok(())
}

pub fn load_results(path: &Path) -> Result<AnalysisExport, AnalyzerError> {
    let body = std::fs::read_to_string(path).map_err(|e| AnalyzerError::io(path, e))?;
    Ok(serde_json::from_str(&body)?)
}
