//! `up` executor: deploy a project's stack with `pulumi up`

use crate::error::{Error, Result};
use devkit::{ExecutorContext, ExecutorResult};
use serde::Deserialize;
use std::path::Path;
use std::process::{Command, Stdio};

const PULUMI: &str = "pulumi";

/// Options accepted by the executor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpOptions {
    /// Stack to deploy; Pulumi's selected stack when unset
    #[serde(default)]
    pub stack: Option<String>,
}

/// Arguments passed to `pulumi`
pub fn build_args(options: &UpOptions) -> Vec<String> {
    let mut args = vec!["up".to_string()];
    if let Some(stack) = options.stack.as_deref().filter(|s| !s.is_empty()) {
        args.push(format!("--stack={stack}"));
    }
    args
}

/// Run `pulumi up` for the project in `ctx`
pub fn run(ctx: &ExecutorContext, options: &UpOptions) -> Result<ExecutorResult> {
    let pulumi = which::which(PULUMI).map_err(|_| Error::PulumiNotInstalled)?;
    run_with(&pulumi, ctx, options)
}

/// Run `up` with an explicit program path
pub fn run_with(program: &Path, ctx: &ExecutorContext, options: &UpOptions) -> Result<ExecutorResult> {
    let args = build_args(options);
    let cwd = ctx.source_dir();
    log::info!(
        "Running {PULUMI} {} for '{}' in {}",
        args.join(" "),
        ctx.project_name,
        cwd.display()
    );

    let status = Command::new(program)
        .args(&args)
        .current_dir(&cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| Error::Spawn {
            command: format!("{PULUMI} {}", args.join(" ")),
            cwd: cwd.clone(),
            source,
        })?;

    if !status.success() {
        log::warn!("{PULUMI} exited with {status}");
    }
    Ok(ExecutorResult {
        success: status.success(),
    })
}
