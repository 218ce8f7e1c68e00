//! Context handed to executors

use crate::error::Result;
use crate::tree::Tree;
use crate::types::ProjectConfiguration;
use serde::Serialize;
use std::path::PathBuf;

/// The project an executor runs for
#[derive(Debug, Clone)]
pub struct ExecutorContext {
    /// Absolute workspace root
    pub root: PathBuf,
    pub project_name: String,
    pub project: ProjectConfiguration,
}

impl ExecutorContext {
    /// Load the context for `project_name` from a tree
    pub fn load<T: Tree + ?Sized>(tree: &T, project_name: &str) -> Result<Self> {
        Ok(Self {
            root: tree.root().to_path_buf(),
            project_name: project_name.to_string(),
            project: tree.read_project(project_name)?,
        })
    }

    /// Absolute path of the project's source directory
    pub fn source_dir(&self) -> PathBuf {
        self.root.join(self.project.source_dir())
    }
}

/// Outcome of an executor run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExecutorResult {
    pub success: bool,
}
