use std::path::Path;

use anyhow::Result;

use crate::config::{BindPolicy, Config};

use super::engine;
use super::types::{HostEnv, LaunchMode, LaunchPlan};

/// `$0` of the inner shell script; shows up in inner-shell diagnostics.
const INNER_ARGV0: &str = "detshell";

/// Resolve a full invocation plan from configuration, captured environment,
/// working directory and passthrough arguments.
///
/// Apart from the on-disk runtime lookup this is a pure function of its
/// inputs: identical environment and arguments yield an identical plan.
pub fn resolve(cfg: &Config, host: &HostEnv, cwd: &Path, argv: Vec<String>) -> Result<LaunchPlan> {
    let candidate = host
        .runtime_override
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(&cfg.runtime_fallback);
    let runtime = engine::locate_runtime(candidate)?;

    let mode = if argv.is_empty() {
        LaunchMode::Shell
    } else {
        LaunchMode::Exec(argv)
    };

    Ok(LaunchPlan {
        runtime,
        image: cfg.image.clone(),
        bind_env: cfg.bind_env.clone(),
        bind_paths: compose_binds(cfg, host.prior_binds.as_deref(), cwd),
        path_extension: cfg.path_extension.clone(),
        mode,
    })
}

/// Compose the bind-path list: any pre-existing value first, verbatim, then
/// the working directory, then the fixed binds admitted by the policy.
pub fn compose_binds(cfg: &Config, prior: Option<&str>, cwd: &Path) -> String {
    let mut entries = Vec::new();
    if let Some(prior) = prior
        && !prior.is_empty()
    {
        entries.push(prior.to_string());
    }
    entries.push(cwd.display().to_string());
    for bind in &cfg.binds {
        let admitted = match cfg.bind_policy {
            BindPolicy::Always => true,
            BindPolicy::CwdPrefix => cwd.starts_with(bind),
        };
        if admitted {
            entries.push(bind.clone());
        }
    }
    entries.join(cfg.bind_separator.as_str())
}

/// The script handed to `bash -l -c` inside the container: extend PATH
/// after profile sourcing, then replace the shell with the target.
fn inner_script(plan: &LaunchPlan) -> String {
    let export = format!("export PATH=\"$PATH:{}\"", plan.path_extension);
    match plan.mode {
        LaunchMode::Exec(_) => format!("{export}; exec \"$@\""),
        LaunchMode::Shell => format!("{export}; exec bash -l"),
    }
}

/// Full argument vector handed to the runtime executable.
///
/// Passthrough arguments ride as positional parameters of the inner
/// script (`exec "$@"`), so argument boundaries survive untouched,
/// embedded whitespace included.
pub fn runtime_args(plan: &LaunchPlan) -> Vec<String> {
    let mut args = vec![
        "exec".to_string(),
        plan.image.clone(),
        "bash".to_string(),
        "-l".to_string(),
        "-c".to_string(),
        inner_script(plan),
    ];
    if let LaunchMode::Exec(argv) = &plan.mode {
        args.push(INNER_ARGV0.to_string());
        args.extend(argv.iter().cloned());
    }
    args
}

/// Printable form of the full invocation, for logs and diagnostics only;
/// the real invocation never passes through a shell string.
pub fn display_command(plan: &LaunchPlan) -> String {
    let mut words = vec![plan.runtime.display().to_string()];
    words.extend(runtime_args(plan));
    shell_words::join(&words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn test_config() -> Config {
        Config {
            image: "/images/stack:nightly".into(),
            path_extension: "/opt/stack/bin".into(),
            ..Config::default()
        }
    }

    fn exec_plan(argv: &[&str]) -> LaunchPlan {
        LaunchPlan {
            runtime: PathBuf::from("/usr/bin/singularity"),
            image: "/images/stack:nightly".into(),
            bind_env: "SINGULARITY_BINDPATH".into(),
            bind_paths: "/work".into(),
            path_extension: "/opt/stack/bin".into(),
            mode: if argv.is_empty() {
                LaunchMode::Shell
            } else {
                LaunchMode::Exec(argv.iter().map(|s| s.to_string()).collect())
            },
        }
    }

    #[test]
    fn binds_append_cwd_to_preset_list() {
        let cfg = test_config();
        let binds = compose_binds(&cfg, Some("/a,/b"), Path::new("/work/run1"));
        assert_eq!(binds, "/a,/b,/work/run1");
    }

    #[test]
    fn binds_without_prior_value_start_at_cwd() {
        let cfg = test_config();
        let binds = compose_binds(&cfg, None, Path::new("/work/run1"));
        assert_eq!(binds, "/work/run1");
        // An empty preset behaves like an unset one.
        let binds = compose_binds(&cfg, Some(""), Path::new("/work/run1"));
        assert_eq!(binds, "/work/run1");
    }

    #[test]
    fn fixed_binds_always_appended_under_always_policy() {
        let cfg = Config {
            binds: vec!["/gpfs".into()],
            ..test_config()
        };
        let binds = compose_binds(&cfg, None, Path::new("/home/user"));
        assert_eq!(binds, "/home/user,/gpfs");
    }

    #[test]
    fn cwd_prefix_policy_admits_only_covering_binds() {
        let cfg = Config {
            binds: vec!["/gpfs".into(), "/scratch".into()],
            bind_policy: BindPolicy::CwdPrefix,
            ..test_config()
        };
        let binds = compose_binds(&cfg, None, Path::new("/gpfs/user/run1"));
        assert_eq!(binds, "/gpfs/user/run1,/gpfs");

        let binds = compose_binds(&cfg, None, Path::new("/home/user"));
        assert_eq!(binds, "/home/user");
    }

    #[test]
    fn exec_args_preserve_argument_boundaries() {
        let plan = exec_plan(&["echo", "hello world"]);
        let args = runtime_args(&plan);
        assert_eq!(args[0], "exec");
        assert_eq!(args[1], "/images/stack:nightly");
        assert_eq!(&args[2..5], &["bash", "-l", "-c"]);
        assert!(args[5].contains("/opt/stack/bin"));
        assert!(args[5].ends_with("exec \"$@\""));
        // $0, then the passthrough vector, one token per argument.
        assert_eq!(&args[6..], &["detshell", "echo", "hello world"]);
    }

    #[test]
    fn shell_mode_requests_interactive_login_shell() {
        let plan = exec_plan(&[]);
        let args = runtime_args(&plan);
        assert_eq!(
            args[5],
            "export PATH=\"$PATH:/opt/stack/bin\"; exec bash -l"
        );
        // No passthrough vector follows in shell mode.
        assert_eq!(args.len(), 6);
    }

    #[test]
    fn resolve_uses_fallback_when_override_unset() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = dir.path().join("singularity");
        fs::write(&runtime, "#!/bin/sh\n").unwrap();

        let cfg = Config {
            runtime_fallback: runtime.to_string_lossy().into_owned(),
            ..test_config()
        };
        let plan = resolve(&cfg, &HostEnv::default(), Path::new("/work"), vec![]).unwrap();
        assert_eq!(plan.runtime, runtime);
    }

    #[test]
    fn resolve_prefers_nonempty_override() {
        let dir = tempfile::tempdir().unwrap();
        let override_rt = dir.path().join("apptainer");
        fs::write(&override_rt, "#!/bin/sh\n").unwrap();

        let cfg = Config {
            runtime_fallback: "/does/not/exist".into(),
            ..test_config()
        };
        let host = HostEnv {
            runtime_override: Some(override_rt.to_string_lossy().into_owned()),
            prior_binds: None,
        };
        let plan = resolve(&cfg, &host, Path::new("/work"), vec![]).unwrap();
        assert_eq!(plan.runtime, override_rt);
    }

    #[test]
    fn resolve_ignores_empty_override() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = dir.path().join("singularity");
        fs::write(&runtime, "#!/bin/sh\n").unwrap();

        let cfg = Config {
            runtime_fallback: runtime.to_string_lossy().into_owned(),
            ..test_config()
        };
        let host = HostEnv {
            runtime_override: Some(String::new()),
            prior_binds: None,
        };
        let plan = resolve(&cfg, &host, Path::new("/work"), vec![]).unwrap();
        assert_eq!(plan.runtime, runtime);
    }

    #[test]
    fn resolve_fails_before_invocation_when_runtime_missing() {
        let cfg = Config {
            runtime_fallback: "/does/not/exist".into(),
            ..test_config()
        };
        assert!(resolve(&cfg, &HostEnv::default(), Path::new("/work"), vec![]).is_err());
    }

    #[test]
    fn resolution_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = dir.path().join("singularity");
        fs::write(&runtime, "#!/bin/sh\n").unwrap();

        let cfg = Config {
            runtime_fallback: runtime.to_string_lossy().into_owned(),
            ..test_config()
        };
        let host = HostEnv {
            runtime_override: None,
            prior_binds: Some("/a,/b".into()),
        };
        let argv = vec!["root".to_string(), "-b".to_string()];
        let first = resolve(&cfg, &host, Path::new("/work"), argv.clone()).unwrap();
        let second = resolve(&cfg, &host, Path::new("/work"), argv).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn display_command_quotes_embedded_whitespace() {
        let plan = exec_plan(&["echo", "hello world"]);
        let rendered = display_command(&plan);
        assert!(rendered.contains("'hello world'"));
        assert!(rendered.starts_with("/usr/bin/singularity exec"));
    }
}
