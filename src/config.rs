use anyhow::{Context, Result};
use devkit::NX_JSON;
use std::path::{Path, PathBuf};

/// Resolve the workspace root
///
/// An explicit path (flag or `NXEXT_WORKSPACE`) wins and may use `~`.
/// Otherwise the nearest ancestor of the current directory containing
/// `nx.json` is used, falling back to the current directory itself.
pub fn workspace_root(explicit: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        let expanded = shellexpand::tilde(path);
        let root = PathBuf::from(expanded.as_ref());
        anyhow::ensure!(
            root.is_dir(),
            "Workspace directory does not exist: {}",
            root.display()
        );
        return Ok(root);
    }

    let cwd = std::env::current_dir().context("Could not determine current directory")?;
    match find_workspace_root(&cwd) {
        Some(root) => Ok(root),
        None => {
            log::debug!("No {NX_JSON} found above {}, using it as the root", cwd.display());
            Ok(cwd)
        }
    }
}

/// Nearest directory at or above `start` that contains `nx.json`
pub fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(NX_JSON).is_file())
        .map(Path::to_path_buf)
}
