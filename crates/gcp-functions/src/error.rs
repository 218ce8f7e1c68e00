//! Error types for the gcp-functions crate

use thiserror::Error;

/// Errors that can occur while generating a function project
#[derive(Debug, Error)]
pub enum Error {
    /// Workspace read or write failed
    #[error(transparent)]
    Workspace(#[from] devkit::Error),

    /// The project name normalizes to nothing
    #[error("invalid project name: '{0}'")]
    InvalidName(String),
}

/// Result type for gcp-functions operations
pub type Result<T> = std::result::Result<T, Error>;
