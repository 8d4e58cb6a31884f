use serde::{Deserialize, Serialize};

/// When a fixed extra bind path is added to the bind-path list.
///
/// The working directory is always bound; this policy only governs the
/// `binds` entries from the config file (or `--bind` flags).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BindPolicy {
    /// Every fixed bind path is appended.
    Always,
    /// A fixed bind path is appended only when the working directory
    /// lies underneath it.
    CwdPrefix,
}

impl BindPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BindPolicy::Always => "always",
            BindPolicy::CwdPrefix => "cwd-prefix",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Environment variable consulted for a runtime executable override.
    pub runtime_env: String,
    /// Runtime executable used when the override is unset or empty.
    pub runtime_fallback: String,
    /// Immutable image the detector stack ships in.
    pub image: String,
    /// Environment variable the runtime reads its bind-path list from.
    pub bind_env: String,
    /// Separator between entries of the bind-path list.
    pub bind_separator: String,
    /// Fixed bind paths appended after the working directory.
    pub binds: Vec<String>,
    pub bind_policy: BindPolicy,
    /// Directory the inner shell appends to PATH.
    pub path_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runtime_env: "DETSHELL_RUNTIME".to_string(),
            runtime_fallback: "/usr/bin/singularity".to_string(),
            image: "/cvmfs/singularity.opensciencegrid.org/eicweb/eic_xl:nightly".to_string(),
            bind_env: "SINGULARITY_BINDPATH".to_string(),
            bind_separator: ",".to_string(),
            binds: Vec::new(),
            bind_policy: BindPolicy::Always,
            path_extension: "/usr/local/bin".to_string(),
        }
    }
}
