use std::path::{Path, PathBuf};

pub const DEFAULT_LOG: &str = "solver.log";

/// Names the solver's log commonly ends up under, tried after the
/// user-supplied path.
pub const FALLBACK_LOGS: [&str; 3] = ["solver.log", "output.log", "bitcoin_solver.log"];

/// The requested log first, then the fallbacks, without duplicates.
pub fn candidate_logs(requested: &Path) -> Vec<PathBuf> {
    let mut out = vec![requested.to_path_buf()];
    for name in FALLBACK_LOGS {
        let p = PathBuf::from(name);
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}
