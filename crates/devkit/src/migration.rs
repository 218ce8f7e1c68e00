//! Migration descriptors and results

use crate::error::Result;
use crate::tree::Tree;
use serde::Serialize;

/// A configuration migration shipped by a plugin
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    /// Plugin package the migration belongs to
    pub package: &'static str,
    /// Plugin version that introduced the new schema
    pub version: &'static str,
    pub description: &'static str,
    pub run: fn(&mut dyn Tree) -> Result<MigrationReport>,
}

impl Migration {
    /// Identifier used on the command line, e.g. `e2e-runner-7.0.0`
    pub fn id(&self) -> String {
        format!("{}-{}", self.package, self.version)
    }
}

/// Per-project outcome of a migration pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Projects that were rewritten
    pub updated: Vec<String>,
    /// Projects with nothing to migrate
    pub unchanged: Vec<String>,
    /// Projects that could not be read or written (name, error message)
    pub failed: Vec<(String, String)>,
}

impl MigrationReport {
    /// Check if every project was processed without error
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of projects seen
    pub fn total(&self) -> usize {
        self.updated.len() + self.unchanged.len() + self.failed.len()
    }
}
