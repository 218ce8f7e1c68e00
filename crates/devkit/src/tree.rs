//! Workspace storage
//!
//! [`Tree`] is the only way plugins touch a workspace. [`FsTree`] backs it
//! with the `project.json` files on disk.

use crate::error::{Error, Result};
use crate::names::join_path_fragments;
use crate::types::ProjectConfiguration;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// File name of a project's configuration
pub const PROJECT_FILE: &str = "project.json";

/// Directories never searched for projects
const IGNORED_DIRS: &[&str] = &["node_modules", "dist", "tmp"];

/// Read/write access to the projects and files of a workspace
///
/// All paths are relative to the workspace root and use `/` separators.
pub trait Tree {
    /// Absolute path of the workspace root
    fn root(&self) -> &Path;

    /// Names of every project in the workspace
    fn project_names(&self) -> Result<Vec<String>>;

    /// Read the full configuration of a project
    fn read_project(&self, name: &str) -> Result<ProjectConfiguration>;

    /// Replace the configuration of an existing project
    fn update_project(&mut self, name: &str, project: &ProjectConfiguration) -> Result<()>;

    /// Add a new project
    fn add_project(&mut self, name: &str, project: &ProjectConfiguration) -> Result<()>;

    /// Whether a file or directory exists
    ///
    /// Probe failures (permission denied, broken links) count as absent.
    fn exists(&self, path: &str) -> bool;

    /// Read a file, `None` if it does not exist
    fn read(&self, path: &str) -> Result<Option<String>>;

    /// Write a file, creating parent directories as needed
    fn write(&mut self, path: &str, contents: &str) -> Result<()>;
}

/// Serialize a project configuration the way it is stored in `project.json`
///
/// `root` is implied by the file location and is not written. With the
/// current file text as `original`, keys keep their order in that file and
/// new keys are appended.
pub fn serialize_project(
    name: &str,
    project: &ProjectConfiguration,
    original: Option<&str>,
) -> Result<String> {
    let mut stored = project.clone();
    stored.root.clear();
    let value = serde_json::to_value(&stored).map_err(|source| Error::Serialize {
        what: format!("project '{name}'"),
        source,
    })?;

    let original = original.and_then(|text| match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => {
            log::debug!("Existing file for '{name}' is not a JSON object, rewriting it");
            None
        }
    });
    let value = match (original, value) {
        (Some(original), Value::Object(updated)) => {
            Value::Object(overlay(&original, &updated, 0))
        }
        (_, value) => value,
    };
    to_pretty_json(&value, name)
}

/// Nesting level whose values are written as-is: project, targets, target
const TARGET_DEPTH: usize = 2;

/// `updated` in the key order of `original`, with new keys last
///
/// Keys missing from `updated` are dropped, except the project keys that
/// serialization leaves out on purpose (`root`, an empty `tags`).
fn overlay(
    original: &Map<String, Value>,
    updated: &Map<String, Value>,
    depth: usize,
) -> Map<String, Value> {
    let mut merged = Map::new();
    for (key, before) in original {
        match updated.get(key) {
            Some(Value::Object(after)) if depth < TARGET_DEPTH => {
                let value = match before {
                    Value::Object(before) => Value::Object(overlay(before, after, depth + 1)),
                    _ => Value::Object(after.clone()),
                };
                merged.insert(key.clone(), value);
            }
            Some(after) => {
                merged.insert(key.clone(), after.clone());
            }
            None if depth == 0 && kept_when_unset(key, before) => {
                merged.insert(key.clone(), before.clone());
            }
            None => {}
        }
    }
    for (key, value) in updated {
        if !merged.contains_key(key) {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

fn kept_when_unset(key: &str, value: &Value) -> bool {
    match key {
        "root" => true,
        "tags" => value.as_array().is_some_and(Vec::is_empty),
        _ => false,
    }
}

pub(crate) fn to_pretty_json(value: &Value, what: &str) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value).map_err(|source| Error::Serialize {
        what: what.to_string(),
        source,
    })?;
    out.push('\n');
    Ok(out)
}

/// A workspace on disk
///
/// Projects are discovered once, when the tree is opened, by searching for
/// `project.json` files.
#[derive(Debug)]
pub struct FsTree {
    root: PathBuf,
    /// Project name -> project directory (relative, `/`-separated)
    projects: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct ProjectName {
    name: Option<String>,
}

impl FsTree {
    /// Open the workspace rooted at `root` and discover its projects
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let projects = discover_projects(&root)?;
        log::debug!(
            "Discovered {} projects under {}",
            projects.len(),
            root.display()
        );
        Ok(Self { root, projects })
    }

    fn project_dir(&self, name: &str) -> Result<&str> {
        self.projects
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| Error::ProjectNotFound(name.to_string()))
    }

    fn abs(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl Tree for FsTree {
    fn root(&self) -> &Path {
        &self.root
    }

    fn project_names(&self) -> Result<Vec<String>> {
        Ok(self.projects.keys().cloned().collect())
    }

    fn read_project(&self, name: &str) -> Result<ProjectConfiguration> {
        let dir = self.project_dir(name)?;
        let path = self.abs(&join_path_fragments(&[dir, PROJECT_FILE]));
        let content = fs::read_to_string(&path).map_err(|source| Error::ReadFailed {
            path: path.clone(),
            source,
        })?;

        let mut project: ProjectConfiguration =
            serde_json::from_str(&content).map_err(|source| Error::Parse { path, source })?;
        project.root = dir.to_string();
        Ok(project)
    }

    fn update_project(&mut self, name: &str, project: &ProjectConfiguration) -> Result<()> {
        let dir = self.project_dir(name)?.to_string();
        let path = join_path_fragments(&[&dir, PROJECT_FILE]);
        let original = self.read(&path)?;
        let content = serialize_project(name, project, original.as_deref())?;
        write_atomic(&self.abs(&path), &content)?;
        log::debug!("Updated project '{name}' at {path}");
        Ok(())
    }

    fn add_project(&mut self, name: &str, project: &ProjectConfiguration) -> Result<()> {
        if self.projects.contains_key(name) {
            return Err(Error::ProjectExists(name.to_string()));
        }

        let dir = join_path_fragments(&[&project.root]);
        let path = join_path_fragments(&[&dir, PROJECT_FILE]);
        if self.exists(&path) {
            return Err(Error::ProjectExists(name.to_string()));
        }

        let mut stored = project.clone();
        stored.name.get_or_insert_with(|| name.to_string());
        let content = serialize_project(name, &stored, None)?;
        self.write(&path, &content)?;

        self.projects.insert(name.to_string(), dir);
        log::debug!("Added project '{name}' at {path}");
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.abs(path).try_exists().unwrap_or(false)
    }

    fn read(&self, path: &str) -> Result<Option<String>> {
        let abs = self.abs(path);
        match fs::read_to_string(&abs) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::ReadFailed { path: abs, source }),
        }
    }

    fn write(&mut self, path: &str, contents: &str) -> Result<()> {
        let abs = self.abs(path);
        if let Some(parent) = abs.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::WriteFailed {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        write_atomic(&abs, contents)
    }
}

/// Write to `<file>.tmp`, then rename over the target
///
/// Readers see either the old or the new content, never a partial write.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::FileNotFound(path.display().to_string()))?;
    let tmp_path = path.with_file_name(format!("{}.tmp", file_name.to_string_lossy()));

    fs::write(&tmp_path, contents).map_err(|source| Error::WriteFailed {
        path: tmp_path.clone(),
        source,
    })?;

    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(Error::WriteFailed {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn is_ignored(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || IGNORED_DIRS.contains(&name.as_ref())
}

fn discover_projects(root: &Path) -> Result<BTreeMap<String, String>> {
    let mut projects = BTreeMap::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => {
                log::warn!("Skipping unreadable path in workspace: {e}");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if !entry.file_type().is_file() || entry.file_name() != PROJECT_FILE {
            continue;
        }

        let Some(parent) = entry.path().parent() else {
            continue;
        };
        let rel = parent.strip_prefix(root).unwrap_or(parent);
        let dir = join_path_fragments(&[&rel.to_string_lossy()]);
        let name = declared_name(entry.path()).unwrap_or_else(|| fallback_name(root, &dir));

        if let Some(existing) = projects.get(&name) {
            return Err(Error::DuplicateProject {
                name,
                first: root.join(existing),
                second: parent.to_path_buf(),
            });
        }
        log::trace!("Found project '{name}' in {dir}");
        projects.insert(name, dir);
    }

    Ok(projects)
}

/// The `name` field of a project file, if it can be read
///
/// Unreadable files still get registered so the failure surfaces when the
/// project itself is read.
fn declared_name(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str::<ProjectName>(&content) {
        Ok(parsed) => parsed.name,
        Err(e) => {
            log::debug!("Could not read name from {}: {e}", path.display());
            None
        }
    }
}

fn fallback_name(root: &Path, dir: &str) -> String {
    if dir == "." {
        root.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "root".to_string())
    } else {
        dir.replace('/', "-")
    }
}
