mod cli;
mod commands;
mod config;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use std::io;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    if let Command::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "nxext", &mut io::stdout());
        return Ok(());
    }

    let root = config::workspace_root(cli.workspace.as_deref())?;
    log::debug!("Workspace root: {}", root.display());

    match cli.command {
        Command::Migrate(args) => commands::migrate::run(&ctx, &root, args),
        Command::Generate(cmd) => commands::generate::run(&ctx, &root, cmd),
        Command::Run(cmd) => commands::run::run(&ctx, &root, cmd),
        Command::Projects => commands::projects::run(&ctx, &root),
        Command::Completions { .. } => Ok(()),
    }
}
