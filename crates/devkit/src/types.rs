//! Persisted project configuration types
//!
//! Field names follow the `project.json` schema (camelCase). Anything the
//! types do not name is kept in `extra` so a read/write cycle never drops
//! user data.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open-ended option set of a target
pub type Options = Map<String, Value>;

/// Kind of project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Application,
    Library,
}

/// Configuration of a single project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Workspace-relative project directory
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub root: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<ProjectType>,

    #[serde(default)]
    pub targets: IndexMap<String, TargetConfiguration>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProjectConfiguration {
    /// Create an empty configuration rooted at `root`
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Directory commands for this project run in: `sourceRoot`, or `root`
    pub fn source_dir(&self) -> &str {
        self.source_root.as_deref().unwrap_or(&self.root)
    }
}

/// Configuration of a single target within a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetConfiguration {
    /// Runner that handles this target; `None` for command-style targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurations: Option<IndexMap<String, Options>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TargetConfiguration {
    /// Create a target handled by `executor` with empty options
    pub fn new(executor: impl Into<String>) -> Self {
        Self {
            executor: Some(executor.into()),
            options: Some(Options::new()),
            ..Default::default()
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_configuration(mut self, name: impl Into<String>, options: Options) -> Self {
        self.configurations
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), options);
        self
    }

    /// Look up a single option value
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.as_ref()?.get(key)
    }

    /// Whether this target is handled by `executor`
    pub fn uses_executor(&self, executor: &str) -> bool {
        self.executor.as_deref() == Some(executor)
    }
}
