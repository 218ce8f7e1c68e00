//! Migrate command - run a plugin's configuration migration over the workspace

use anyhow::{Context, Result, bail};
use colored::Colorize;
use devkit::{DryRunTree, FsTree, Migration, MigrationReport};
use std::path::Path;

use crate::Context as AppContext;
use crate::cli::MigrateArgs;
use crate::ui;

/// Every migration known to the CLI
pub fn all_migrations() -> impl Iterator<Item = &'static Migration> {
    e2e_runner::MIGRATIONS.iter()
}

pub fn find_migration(id: &str) -> Option<&'static Migration> {
    all_migrations().find(|m| m.id() == id)
}

pub fn run(ctx: &AppContext, root: &Path, args: MigrateArgs) -> Result<()> {
    if args.list {
        list();
        return Ok(());
    }

    let Some(id) = args.migration else {
        bail!("No migration given (use --list to see available migrations)");
    };
    let Some(migration) = find_migration(&id) else {
        let available: Vec<String> = all_migrations().map(Migration::id).collect();
        bail!(
            "Unknown migration '{id}'. Available: {}",
            available.join(", ")
        );
    };

    ui::header(&format!("Migration {id}"));
    if !ctx.quiet {
        ui::dim(migration.description);
    }

    let tree = FsTree::open(root)
        .with_context(|| format!("Failed to load workspace at {}", root.display()))?;

    let report = if args.dry_run {
        let mut dry = DryRunTree::new(tree);
        let report = (migration.run)(&mut dry)
            .with_context(|| format!("Migration {id} failed"))?;
        print_report(ctx, &report);
        super::print_changes(dry.changes());
        println!();
        ui::warn("Dry run - no changes made");
        report
    } else {
        let mut tree = tree;
        let report = (migration.run)(&mut tree)
            .with_context(|| format!("Migration {id} failed"))?;
        print_report(ctx, &report);
        report
    };

    if !report.is_success() {
        bail!("{} project(s) could not be migrated", report.failed.len());
    }
    Ok(())
}

fn list() {
    ui::header("Available migrations");
    for migration in all_migrations() {
        println!("  {}  {}", migration.id().bold(), migration.description.dimmed());
    }
}

fn print_report(ctx: &AppContext, report: &MigrationReport) {
    println!();
    if report.updated.is_empty() && report.failed.is_empty() {
        ui::info(&format!(
            "Nothing to migrate ({} projects checked)",
            report.total()
        ));
        return;
    }

    for name in &report.updated {
        ui::success(&format!("Updated {name}"));
    }
    for (name, error) in &report.failed {
        ui::error(&format!("Failed {name}: {error}"));
    }

    if ctx.verbose > 0 {
        for name in &report.unchanged {
            ui::dim(&format!("Unchanged {name}"));
        }
    } else if !ctx.quiet && !report.unchanged.is_empty() {
        ui::dim(&format!("{} project(s) unchanged", report.unchanged.len()));
    }
}
