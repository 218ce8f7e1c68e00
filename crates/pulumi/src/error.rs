//! Error types for the pulumi crate

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running Pulumi
#[derive(Debug, Error)]
pub enum Error {
    /// No `pulumi` binary on PATH
    #[error("pulumi is not installed!")]
    PulumiNotInstalled,

    /// Workspace read failed
    #[error(transparent)]
    Workspace(#[from] devkit::Error),

    /// The command could not be started
    #[error("failed to execute {command} in {}: {source}", .cwd.display())]
    Spawn {
        command: String,
        cwd: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for pulumi operations
pub type Result<T> = std::result::Result<T, Error>;
