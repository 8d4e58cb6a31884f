use std::path::PathBuf;

use serde::Serialize;

use crate::config::Config;

/// What the inner login shell does after extending PATH.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    /// Replace the inner shell with the given argument vector.
    Exec(Vec<String>),
    /// Hand the terminal to an interactive login shell.
    Shell,
}

/// A fully resolved container invocation.
///
/// Assembled exactly once per process by [`super::plan::resolve`] and
/// consumed exactly once by [`super::run::launch`]. Identical environment
/// and arguments always resolve to an identical plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    /// Container runtime executable, resolved to a concrete path.
    pub runtime: PathBuf,
    /// Immutable image the detector stack ships in.
    pub image: String,
    /// Environment variable the runtime reads its bind-path list from.
    pub bind_env: String,
    /// Final bind-path list: prior value preserved, working directory and
    /// admitted fixed binds appended.
    pub bind_paths: String,
    /// Directory the inner shell appends to PATH.
    pub path_extension: String,
    pub mode: LaunchMode,
}

/// The two environment variables the launcher reads, captured once at
/// process start so resolution never touches ambient state again.
#[derive(Debug, Clone, Default)]
pub struct HostEnv {
    /// Value of the runtime override variable, if set.
    pub runtime_override: Option<String>,
    /// Pre-existing value of the bind-path variable, if set.
    pub prior_binds: Option<String>,
}

impl HostEnv {
    /// Capture the variables named by `cfg` from the process environment.
    pub fn capture(cfg: &Config) -> Self {
        Self {
            runtime_override: std::env::var(&cfg.runtime_env).ok(),
            prior_binds: std::env::var(&cfg.bind_env).ok(),
        }
    }
}
