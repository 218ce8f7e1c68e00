//! Projects command - list projects and their targets

use anyhow::{Context, Result};
use colored::Colorize;
use devkit::{FsTree, Tree};
use std::path::Path;

use crate::Context as AppContext;
use crate::ui;

pub fn run(ctx: &AppContext, root: &Path) -> Result<()> {
    let tree = FsTree::open(root)
        .with_context(|| format!("Failed to load workspace at {}", root.display()))?;
    let names = tree.project_names()?;

    ui::header(&format!("Projects ({})", names.len()));
    if names.is_empty() {
        ui::info(&format!("No project.json files under {}", root.display()));
        return Ok(());
    }

    for name in &names {
        let project = match tree.read_project(name) {
            Ok(project) => project,
            Err(e) => {
                ui::error(&format!("{name}: {e}"));
                continue;
            }
        };

        ui::section(name);
        ui::kv("root", &project.root);
        if ctx.verbose > 0 {
            if let Some(source_root) = &project.source_root {
                ui::kv("sourceRoot", source_root);
            }
            if !project.tags.is_empty() {
                ui::kv("tags", &project.tags.join(", "));
            }
        }
        for (target, config) in &project.targets {
            let executor = config.executor.as_deref().unwrap_or("(command)");
            println!("  {} {}", target.bold(), executor.dimmed());
        }
    }
    Ok(())
}
