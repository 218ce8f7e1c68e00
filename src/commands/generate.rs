//! Generate command - scaffold new projects

use anyhow::{Context, Result};
use devkit::{DryRunTree, FsTree, Tree};
use gcp_functions::generators::init::{self, InitResult, InitSchema};
use std::path::Path;

use crate::Context as AppContext;
use crate::cli::{GcpFunctionsInitArgs, GenerateCommand};
use crate::ui;

pub fn run(ctx: &AppContext, root: &Path, cmd: GenerateCommand) -> Result<()> {
    match cmd {
        GenerateCommand::GcpFunctionsInit(args) => gcp_functions_init(ctx, root, args),
    }
}

fn gcp_functions_init(ctx: &AppContext, root: &Path, args: GcpFunctionsInitArgs) -> Result<()> {
    ui::header("gcp-functions:init");

    let schema = InitSchema {
        name: args.name,
        directory: args.directory,
        tags: args.tags,
    };
    let tree = FsTree::open(root)
        .with_context(|| format!("Failed to load workspace at {}", root.display()))?;

    if args.dry_run {
        let mut dry = DryRunTree::new(tree);
        let result = generate(&mut dry, &schema)?;
        print_result(ctx, &result);
        super::print_changes(dry.changes());
        println!();
        ui::warn("Dry run - no changes made");
    } else {
        let mut tree = tree;
        let result = generate(&mut tree, &schema)?;
        print_result(ctx, &result);
    }
    Ok(())
}

fn generate(tree: &mut dyn Tree, schema: &InitSchema) -> Result<InitResult> {
    init::init(tree, schema).with_context(|| format!("Failed to generate '{}'", schema.name))
}

fn print_result(ctx: &AppContext, result: &InitResult) {
    ui::success(&format!(
        "Created project {} at {}",
        result.project_name, result.project_root
    ));
    if ctx.quiet {
        return;
    }
    if result.dependencies_added {
        ui::info("Added @google-cloud/functions-framework to package.json");
    }
    ui::dim("Template files are not generated; add src/main.ts before building");
}
