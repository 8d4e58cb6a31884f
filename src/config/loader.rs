use std::path::Path;

use anyhow::{Context, Result};

use super::types::Config;

/// Name of the optional per-directory config file.
pub const CONFIG_FILE: &str = ".detshell.yml";

/// Load launcher configuration from `dir`.
///
/// A missing file yields the built-in defaults; a present but malformed
/// file is an error. Fields absent from the file keep their defaults.
pub fn load(dir: &Path) -> Result<Config> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: Config = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(config)
}
