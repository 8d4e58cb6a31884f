use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use detshell::cli::Cli;
use detshell::config;
use detshell::container::{self, HostEnv};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let cwd = std::env::current_dir().context("failed to determine the working directory")?;
    let mut cfg = config::load(&cwd)?;
    cli.apply(&mut cfg);

    let mut host = HostEnv::capture(&cfg);
    // An explicit --runtime beats the environment override.
    if let Some(runtime) = &cli.runtime {
        host.runtime_override = Some(runtime.clone());
    }

    let plan = container::resolve(&cfg, &host, &cwd, cli.command.clone())?;
    debug!("resolved runtime: {}", plan.runtime.display());
    debug!("bind paths ({}): {}", plan.bind_env, plan.bind_paths);
    debug!("command: {}", container::display_command(&plan));

    if cli.dry_run {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let code = container::launch(&plan)?;
    std::process::exit(code);
}

/// Diagnostics go to stderr only; stdout belongs to the child (and to
/// `--dry-run` output). `RUST_LOG` takes precedence over the flag.
fn init_logger(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
