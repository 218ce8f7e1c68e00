//! Workspace layout settings from `nx.json`

use crate::error::{Error, Result};
use crate::tree::Tree;
use serde::Deserialize;

/// Workspace configuration file at the root
pub const NX_JSON: &str = "nx.json";

/// Where generated applications go
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceLayout {
    #[serde(default = "default_apps_dir")]
    pub apps_dir: String,
}

fn default_apps_dir() -> String {
    "apps".to_string()
}

impl Default for WorkspaceLayout {
    fn default() -> Self {
        Self {
            apps_dir: default_apps_dir(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NxJson {
    #[serde(default)]
    workspace_layout: Option<WorkspaceLayout>,
}

/// Read the workspace layout, defaulting when `nx.json` or the section is missing
pub fn workspace_layout<T: Tree + ?Sized>(tree: &T) -> Result<WorkspaceLayout> {
    let Some(content) = tree.read(NX_JSON)? else {
        log::debug!("No {NX_JSON}, using default workspace layout");
        return Ok(WorkspaceLayout::default());
    };

    let nx: NxJson = serde_json::from_str(&content).map_err(|source| Error::Parse {
        path: tree.root().join(NX_JSON),
        source,
    })?;
    Ok(nx.workspace_layout.unwrap_or_default())
}
