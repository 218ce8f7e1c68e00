//! Error types for the devkit crate

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing a workspace
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read a file
    #[error("failed to read {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not valid JSON for the expected shape
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize a value to JSON
    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// Workspace traversal failed
    #[error("failed to walk workspace: {0}")]
    Walk(#[from] walkdir::Error),

    /// No project with this name exists
    #[error("project not found: {0}")]
    ProjectNotFound(String),

    /// A project with this name already exists
    #[error("project already exists: {0}")]
    ProjectExists(String),

    /// Two project files declare the same name
    #[error(
        "duplicate project name '{name}' in {} and {}",
        .first.display(),
        .second.display()
    )]
    DuplicateProject {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// A required file is missing
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// JSON file has an unexpected structure
    #[error("invalid JSON in {path}: {reason}")]
    InvalidJson { path: String, reason: String },
}

/// Result type for devkit operations
pub type Result<T> = std::result::Result<T, Error>;
