use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Locate the container runtime executable.
///
/// A candidate containing a path separator is taken as-is and must name an
/// existing file; a bare name is looked up on PATH. Either failure aborts
/// resolution before anything is invoked.
pub fn locate_runtime(candidate: &str) -> Result<PathBuf> {
    if candidate.trim().is_empty() {
        bail!("Runtime executable cannot be blank");
    }
    if candidate.contains(std::path::MAIN_SEPARATOR) {
        let path = PathBuf::from(candidate);
        if !path.is_file() {
            bail!("Runtime executable not found: {}", path.display());
        }
        return Ok(path);
    }
    which::which(candidate)
        .with_context(|| format!("runtime executable `{candidate}` is not on PATH"))
}
