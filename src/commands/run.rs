//! Run command - execute a plugin executor for a project

use anyhow::{Context, Result, bail};
use devkit::{ExecutorContext, FsTree, ProjectConfiguration};
use pulumi::executors::up::{self, UpOptions};
use serde_json::Value;
use std::path::Path;

use crate::Context as AppContext;
use crate::cli::RunCommand;
use crate::ui;

const PULUMI_UP_EXECUTOR: &str = "@nx-extend/pulumi:up";

pub fn run(ctx: &AppContext, root: &Path, cmd: RunCommand) -> Result<()> {
    match cmd {
        RunCommand::PulumiUp {
            project,
            target,
            stack,
        } => pulumi_up(ctx, root, &project, &target, stack),
    }
}

fn pulumi_up(
    ctx: &AppContext,
    root: &Path,
    project: &str,
    target: &str,
    stack: Option<String>,
) -> Result<()> {
    let tree = FsTree::open(root)
        .with_context(|| format!("Failed to load workspace at {}", root.display()))?;
    let executor_ctx = ExecutorContext::load(&tree, project)
        .with_context(|| format!("Failed to load project '{project}'"))?;

    let mut options = target_options::<UpOptions>(&executor_ctx.project, target)?;
    if stack.is_some() {
        options.stack = stack;
    }

    if !ctx.quiet {
        ui::info(&format!("pulumi up for {project}"));
    }
    let result = up::run(&executor_ctx, &options)?;
    if !result.success {
        bail!("pulumi up failed for '{project}'");
    }
    ui::success(&format!("Deployed {project}"));
    Ok(())
}

/// Options configured on `target`, or defaults when the target is missing
///
/// A target with a different executor is still read, with a warning.
fn target_options<T>(project: &ProjectConfiguration, target: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    let Some(config) = project.targets.get(target) else {
        log::debug!("No '{target}' target, using default options");
        return Ok(T::default());
    };

    if !config.uses_executor(PULUMI_UP_EXECUTOR) {
        log::warn!(
            "Target '{target}' uses {}, not {PULUMI_UP_EXECUTOR}",
            config.executor.as_deref().unwrap_or("a command")
        );
    }

    let options = Value::Object(config.options.clone().unwrap_or_default());
    serde_json::from_value(options)
        .with_context(|| format!("Invalid options for target '{target}'"))
}
