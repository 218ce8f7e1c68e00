//! A tree that records writes instead of performing them

use crate::error::{Error, Result};
use crate::names::join_path_fragments;
use crate::tree::{PROJECT_FILE, Tree, serialize_project};
use crate::types::ProjectConfiguration;
use std::collections::BTreeMap;
use std::path::Path;

/// A pending file change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    /// Workspace-relative path
    pub path: String,
    /// Content before the change, `None` for a new file
    pub before: Option<String>,
    pub after: String,
}

impl Change {
    pub fn is_create(&self) -> bool {
        self.before.is_none()
    }
}

/// Wraps a tree so that writes are collected as [`Change`]s
///
/// Reads see pending writes, so a generator or migration behaves exactly as
/// it would against the real tree.
#[derive(Debug)]
pub struct DryRunTree<T> {
    inner: T,
    projects: BTreeMap<String, ProjectConfiguration>,
    files: BTreeMap<String, String>,
    changes: BTreeMap<String, Change>,
}

impl<T: Tree> DryRunTree<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            projects: BTreeMap::new(),
            files: BTreeMap::new(),
            changes: BTreeMap::new(),
        }
    }

    /// Recorded changes, ordered by path
    pub fn changes(&self) -> impl Iterator<Item = &Change> {
        self.changes.values()
    }

    pub fn into_changes(self) -> Vec<Change> {
        self.changes.into_values().collect()
    }

    fn record(&mut self, path: String, before: Option<String>, after: String) {
        self.changes
            .entry(path.clone())
            .and_modify(|change| change.after.clone_from(&after))
            .or_insert(Change {
                path,
                before,
                after,
            });
    }
}

impl<T: Tree> Tree for DryRunTree<T> {
    fn root(&self) -> &Path {
        self.inner.root()
    }

    fn project_names(&self) -> Result<Vec<String>> {
        let mut names = self.inner.project_names()?;
        for name in self.projects.keys() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        Ok(names)
    }

    fn read_project(&self, name: &str) -> Result<ProjectConfiguration> {
        match self.projects.get(name) {
            Some(project) => Ok(project.clone()),
            None => self.inner.read_project(name),
        }
    }

    fn update_project(&mut self, name: &str, project: &ProjectConfiguration) -> Result<()> {
        let current = self.read_project(name)?;
        let path = join_path_fragments(&[&current.root, PROJECT_FILE]);
        let on_disk = self.inner.read(&path)?;
        let pending = self.read(&path)?;
        let after = serialize_project(name, project, pending.as_deref())?;

        self.record(path.clone(), on_disk, after.clone());
        self.files.insert(path, after);
        self.projects.insert(name.to_string(), project.clone());
        Ok(())
    }

    fn add_project(&mut self, name: &str, project: &ProjectConfiguration) -> Result<()> {
        if self.projects.contains_key(name) || self.inner.project_names()?.iter().any(|n| n == name)
        {
            return Err(Error::ProjectExists(name.to_string()));
        }

        let path = join_path_fragments(&[&project.root, PROJECT_FILE]);
        if self.exists(&path) {
            return Err(Error::ProjectExists(name.to_string()));
        }

        let mut stored = project.clone();
        stored.name.get_or_insert_with(|| name.to_string());
        let after = serialize_project(name, &stored, None)?;

        self.record(path.clone(), None, after.clone());
        self.files.insert(path, after);
        self.projects.insert(name.to_string(), stored);
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path) || self.inner.exists(path)
    }

    fn read(&self, path: &str) -> Result<Option<String>> {
        match self.files.get(path) {
            Some(content) => Ok(Some(content.clone())),
            None => self.inner.read(path),
        }
    }

    fn write(&mut self, path: &str, contents: &str) -> Result<()> {
        let before = self.inner.read(path)?;
        self.record(path.to_string(), before, contents.to_string());
        self.files.insert(path.to_string(), contents.to_string());
        Ok(())
    }
}
