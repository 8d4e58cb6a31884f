use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};

use super::plan::runtime_args;
use super::types::LaunchPlan;

/// Launch the container and block until it exits.
///
/// stdin/stdout/stderr are inherited, so an interactive shell owns the
/// terminal. The bind-path variable is set on the child only; the
/// launcher's own environment is never mutated. Returns the exit code
/// this process should terminate with.
pub fn launch(plan: &LaunchPlan) -> Result<i32> {
    let status = Command::new(&plan.runtime)
        .args(runtime_args(plan))
        .env(&plan.bind_env, &plan.bind_paths)
        .status()
        .with_context(|| format!("failed to invoke {}", plan.runtime.display()))?;
    Ok(exit_code(status))
}

/// Map a child exit status onto the launcher's own: the child's code
/// verbatim, 128 + N for death by signal N, 1 if neither is known.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
