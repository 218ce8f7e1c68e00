//! Edits to `package.json` dependency sections

use crate::error::{Error, Result};
use crate::tree::{Tree, to_pretty_json};
use serde_json::{Map, Value};

/// Add dependencies to a `package.json`
///
/// Existing entries keep their version. Sections are sorted by package name
/// after insertion. The file is written only when something was added.
///
/// Returns whether the file changed.
pub fn add_dependencies<T: Tree + ?Sized>(
    tree: &mut T,
    path: &str,
    dependencies: &[(&str, &str)],
    dev_dependencies: &[(&str, &str)],
) -> Result<bool> {
    let content = tree
        .read(path)?
        .ok_or_else(|| Error::FileNotFound(path.to_string()))?;

    let mut json: Value = serde_json::from_str(&content).map_err(|source| Error::Parse {
        path: path.into(),
        source,
    })?;
    let Some(root) = json.as_object_mut() else {
        return Err(Error::InvalidJson {
            path: path.to_string(),
            reason: "expected an object at the top level".to_string(),
        });
    };

    let mut changed = merge_section(root, "dependencies", dependencies, path)?;
    changed |= merge_section(root, "devDependencies", dev_dependencies, path)?;

    if changed {
        tree.write(path, &to_pretty_json(&json, path)?)?;
        log::debug!("Updated dependencies in {path}");
    }
    Ok(changed)
}

fn merge_section(
    root: &mut Map<String, Value>,
    section: &str,
    entries: &[(&str, &str)],
    path: &str,
) -> Result<bool> {
    if entries.is_empty() {
        return Ok(false);
    }

    let deps = root
        .entry(section)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| Error::InvalidJson {
            path: path.to_string(),
            reason: format!("'{section}' is not an object"),
        })?;

    let mut changed = false;
    for (name, version) in entries {
        if !deps.contains_key(*name) {
            deps.insert((*name).to_string(), Value::String((*version).to_string()));
            changed = true;
        }
    }

    if changed {
        deps.sort_keys();
    }
    Ok(changed)
}
