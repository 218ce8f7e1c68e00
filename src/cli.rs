use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "nxext")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Run generators, executors and migrations against an Nx workspace", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Workspace root (defaults to the nearest directory containing nx.json)
    #[arg(short, long, global = true, env = "NXEXT_WORKSPACE")]
    pub workspace: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rewrite project configuration for a new plugin version
    Migrate(MigrateArgs),

    /// Scaffold new projects
    #[command(subcommand)]
    Generate(GenerateCommand),

    /// Run an executor for a project
    #[command(subcommand)]
    Run(RunCommand),

    /// List projects and their targets
    Projects,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Migrate
// ============================================================================

#[derive(Args)]
pub struct MigrateArgs {
    /// Migration to run, e.g. e2e-runner-7.0.0
    #[arg(required_unless_present = "list")]
    pub migration: Option<String>,

    /// List available migrations
    #[arg(short, long, conflicts_with = "migration")]
    pub list: bool,

    /// Dry run - show the changes without writing them
    #[arg(short, long)]
    pub dry_run: bool,
}

// ============================================================================
// Generate
// ============================================================================

#[derive(Subcommand)]
pub enum GenerateCommand {
    /// Add a Google Cloud Function project
    GcpFunctionsInit(GcpFunctionsInitArgs),
}

#[derive(Args)]
pub struct GcpFunctionsInitArgs {
    /// Name of the function project
    pub name: String,

    /// Directory the project is placed in, under the apps dir
    #[arg(short = 'D', long)]
    pub directory: Option<String>,

    /// Comma-separated tags
    #[arg(short, long)]
    pub tags: Option<String>,

    /// Dry run - show the changes without writing them
    #[arg(short, long)]
    pub dry_run: bool,
}

// ============================================================================
// Run
// ============================================================================

#[derive(Subcommand)]
pub enum RunCommand {
    /// Deploy a Pulumi project with `pulumi up`
    PulumiUp {
        /// Project to deploy
        project: String,

        /// Target whose options are used
        #[arg(long, default_value = "up")]
        target: String,

        /// Stack to deploy (overrides the target's option)
        #[arg(short, long)]
        stack: Option<String>,
    },
}
