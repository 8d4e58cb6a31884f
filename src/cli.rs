use clap::Parser;

use crate::config::Config;

/// Containerized shell launcher for the detector software stack.
///
/// With no COMMAND, opens an interactive login shell inside the stack
/// container. With a COMMAND, runs it inside the container and exits with
/// its status.
#[derive(Debug, Parser)]
#[command(name = "detshell", version)]
pub struct Cli {
    /// Override the container image reference.
    #[arg(long, value_name = "REF")]
    pub image: Option<String>,

    /// Override the container runtime executable.
    #[arg(long, value_name = "PATH")]
    pub runtime: Option<String>,

    /// Bind an additional host path into the container (repeatable).
    #[arg(long = "bind", value_name = "PATH")]
    pub binds: Vec<String>,

    /// Print the resolved invocation as JSON instead of launching.
    #[arg(long)]
    pub dry_run: bool,

    /// Log resolution steps to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to run inside the container; interactive shell if omitted.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl Cli {
    /// Fold flag overrides into the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(image) = &self.image {
            config.image = image.clone();
        }
        config.binds.extend(self.binds.iter().cloned());
    }
}
