//! 7.0.0: Playwright targets move to the `@nx/playwright` runner
//!
//! Targets run by the e2e runner with `runner: "playwright"` get the new
//! runner id and the path of the project's Playwright config. Every other
//! option is carried over, and options the user already set under the new
//! names win over the inferred ones.

use devkit::{
    MigrationReport, Options, ProjectConfiguration, Result, TargetConfiguration, Tree,
    find_config_file,
};
use serde_json::Value;

pub const LEGACY_EXECUTOR: &str = "@nx-extend/e2e-runner:run";
pub const LEGACY_RUNNER: &str = "playwright";
pub const NEW_RUNNER: &str = "@nx/playwright";

const RUNNER_KEY: &str = "runner";
const CONFIG_KEY: &str = "config";
const CONFIG_BASE_NAME: &str = "playwright.config";
const CONFIG_EXTENSIONS: &[&str] = &["ts", "js"];

/// Run the migration over every project in the workspace
///
/// A project that fails to read or write is recorded in the report and the
/// pass moves on. Only failing to list the projects aborts the pass.
pub fn update(tree: &mut dyn Tree) -> Result<MigrationReport> {
    let mut names = tree.project_names()?;
    names.sort();

    let mut report = MigrationReport::default();
    for name in names {
        match update_project(tree, &name) {
            Ok(true) => report.updated.push(name),
            Ok(false) => report.unchanged.push(name),
            Err(e) => {
                log::warn!("Failed to migrate project '{name}': {e}");
                report.failed.push((name, e.to_string()));
            }
        }
    }

    log::info!(
        "e2e-runner 7.0.0: {} updated, {} unchanged, {} failed",
        report.updated.len(),
        report.unchanged.len(),
        report.failed.len()
    );
    Ok(report)
}

/// Migrate one project; returns whether it was written
fn update_project(tree: &mut dyn Tree, name: &str) -> Result<bool> {
    let project = tree.read_project(name)?;
    match migrate_project(&*tree, &project) {
        Some(migrated) => {
            tree.update_project(name, &migrated)?;
            Ok(true)
        }
        None => {
            log::debug!("No legacy Playwright targets in '{name}'");
            Ok(false)
        }
    }
}

/// The migrated configuration, or `None` when no target matches
pub fn migrate_project(
    tree: &dyn Tree,
    project: &ProjectConfiguration,
) -> Option<ProjectConfiguration> {
    let mut migrated = project.clone();
    let mut changed = false;

    for (target_name, target) in &mut migrated.targets {
        if !is_legacy_playwright(target) {
            continue;
        }

        let config = find_config_file(tree, &project.root, CONFIG_BASE_NAME, CONFIG_EXTENSIONS);
        log::debug!(
            "Migrating target '{target_name}' in {} (config: {})",
            project.root,
            config.as_deref().unwrap_or("none")
        );

        let original = target.options.take().unwrap_or_default();
        target.options = Some(migrate_options(original, config));
        changed = true;
    }

    changed.then_some(migrated)
}

/// Whether a target uses the legacy e2e runner with Playwright
pub fn is_legacy_playwright(target: &TargetConfiguration) -> bool {
    target.uses_executor(LEGACY_EXECUTOR)
        && target.option(RUNNER_KEY).and_then(Value::as_str) == Some(LEGACY_RUNNER)
}

/// `{ runner, config, ...original }` with the legacy runner dropped
///
/// Keys from `original` overwrite the defaults in place, so `runner` and
/// `config` stay first.
fn migrate_options(original: Options, config: Option<String>) -> Options {
    let mut options = Options::new();
    options.insert(RUNNER_KEY.to_string(), Value::String(NEW_RUNNER.to_string()));
    if let Some(config) = config {
        options.insert(CONFIG_KEY.to_string(), Value::String(config));
    }

    for (key, value) in original {
        if key != RUNNER_KEY {
            options.insert(key, value);
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use devkit::{Error, FsTree};
    use serde_json::json;
    use std::fs;
    use std::io;
    use std::path::Path;
    use tempfile::TempDir;

    /// Tree wrapper that counts project writes and can refuse some of them
    struct CountingTree {
        inner: FsTree,
        updates: Vec<String>,
        read_only: Vec<String>,
    }

    impl Tree for CountingTree {
        fn root(&self) -> &Path {
            self.inner.root()
        }
        fn project_names(&self) -> Result<Vec<String>> {
            self.inner.project_names()
        }
        fn read_project(&self, name: &str) -> Result<ProjectConfiguration> {
            self.inner.read_project(name)
        }
        fn update_project(&mut self, name: &str, project: &ProjectConfiguration) -> Result<()> {
            if self.read_only.iter().any(|n| n == name) {
                return Err(Error::WriteFailed {
                    path: self.root().join(&project.root).join("project.json"),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
                });
            }
            self.updates.push(name.to_string());
            self.inner.update_project(name, project)
        }
        fn add_project(&mut self, name: &str, project: &ProjectConfiguration) -> Result<()> {
            self.inner.add_project(name, project)
        }
        fn exists(&self, path: &str) -> bool {
            self.inner.exists(path)
        }
        fn read(&self, path: &str) -> Result<Option<String>> {
            self.inner.read(path)
        }
        fn write(&mut self, path: &str, contents: &str) -> Result<()> {
            self.inner.write(path, contents)
        }
    }

    fn write_json(root: &Path, rel: &str, value: &serde_json::Value) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    }

    fn touch(root: &Path, rel: &str) {
        fs::write(root.join(rel), "export default {}\n").unwrap();
    }

    fn open(tmp: &TempDir) -> CountingTree {
        CountingTree {
            inner: FsTree::open(tmp.path()).unwrap(),
            updates: Vec::new(),
            read_only: Vec::new(),
        }
    }

    fn legacy_target(options: serde_json::Value) -> serde_json::Value {
        json!({ "executor": LEGACY_EXECUTOR, "options": options })
    }

    /// Project A has a legacy Playwright target and a `.js` config; B has nothing to migrate
    fn scenario() -> TempDir {
        let tmp = TempDir::new().unwrap();
        write_json(
            tmp.path(),
            "apps/a/project.json",
            &json!({
                "name": "a",
                "targets": { "e2e": legacy_target(json!({ "runner": "playwright" })) }
            }),
        );
        touch(tmp.path(), "apps/a/playwright.config.js");
        write_json(
            tmp.path(),
            "apps/b/project.json",
            &json!({
                "name": "b",
                "targets": { "build": { "executor": "other:build", "options": {} } }
            }),
        );
        tmp
    }

    #[test]
    fn test_scenario() {
        let tmp = scenario();
        let b_before = fs::read_to_string(tmp.path().join("apps/b/project.json")).unwrap();
        let mut tree = open(&tmp);

        let report = update(&mut tree).unwrap();
        assert_eq!(report.updated, ["a"]);
        assert_eq!(report.unchanged, ["b"]);
        assert!(report.is_success());
        assert_eq!(tree.updates, ["a"]);

        let a = tree.read_project("a").unwrap();
        let e2e = &a.targets["e2e"];
        assert_eq!(e2e.executor.as_deref(), Some(LEGACY_EXECUTOR));
        assert_eq!(
            serde_json::to_value(e2e.options.as_ref().unwrap()).unwrap(),
            json!({ "runner": NEW_RUNNER, "config": "apps/a/playwright.config.js" })
        );

        let b_after = fs::read_to_string(tmp.path().join("apps/b/project.json")).unwrap();
        assert_eq!(b_before, b_after);
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let tmp = scenario();
        let mut tree = open(&tmp);

        update(&mut tree).unwrap();
        let after_first = fs::read_to_string(tmp.path().join("apps/a/project.json")).unwrap();
        tree.updates.clear();

        let report = update(&mut tree).unwrap();
        assert!(report.updated.is_empty());
        assert_eq!(report.unchanged, ["a", "b"]);
        assert!(tree.updates.is_empty());

        let after_second = fs::read_to_string(tmp.path().join("apps/a/project.json")).unwrap();
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn test_user_config_wins_over_probe() {
        let tmp = TempDir::new().unwrap();
        write_json(
            tmp.path(),
            "apps/web-e2e/project.json",
            &json!({
                "name": "web-e2e",
                "targets": {
                    "e2e": legacy_target(json!({
                        "runner": "playwright",
                        "config": "custom/playwright.ci.ts",
                        "headed": true
                    }))
                }
            }),
        );
        touch(tmp.path(), "apps/web-e2e/playwright.config.ts");
        let mut tree = open(&tmp);

        update(&mut tree).unwrap();

        let project = tree.read_project("web-e2e").unwrap();
        let options = project.targets["e2e"].options.clone().unwrap();
        let keys: Vec<_> = options.keys().map(String::as_str).collect();
        assert_eq!(keys, ["runner", "config", "headed"]);
        assert_eq!(options["runner"], json!(NEW_RUNNER));
        assert_eq!(options["config"], json!("custom/playwright.ci.ts"));
        assert_eq!(options["headed"], json!(true));
    }

    #[test]
    fn test_missing_config_file_omits_config() {
        let tmp = TempDir::new().unwrap();
        write_json(
            tmp.path(),
            "apps/e2e/project.json",
            &json!({
                "name": "e2e",
                "targets": {
                    "e2e": legacy_target(json!({ "runner": "playwright", "baseUrl": "http://localhost:4200" }))
                }
            }),
        );
        let mut tree = open(&tmp);

        let report = update(&mut tree).unwrap();
        assert_eq!(report.updated, ["e2e"]);

        let project = tree.read_project("e2e").unwrap();
        assert_eq!(
            serde_json::to_value(project.targets["e2e"].options.as_ref().unwrap()).unwrap(),
            json!({ "runner": NEW_RUNNER, "baseUrl": "http://localhost:4200" })
        );
    }

    #[test]
    fn test_only_matching_targets_change() {
        let tmp = TempDir::new().unwrap();
        write_json(
            tmp.path(),
            "apps/site/project.json",
            &json!({
                "name": "site",
                "targets": {
                    "e2e": legacy_target(json!({ "runner": "playwright" })),
                    "e2e-cypress": legacy_target(json!({ "runner": "cypress" })),
                    "other-runner": { "executor": "@acme/runner:run", "options": { "runner": "playwright" } },
                    "no-options": { "executor": LEGACY_EXECUTOR },
                    "lint": { "command": "eslint ." }
                }
            }),
        );
        touch(tmp.path(), "apps/site/playwright.config.ts");
        let mut tree = open(&tmp);
        let before = tree.read_project("site").unwrap();

        update(&mut tree).unwrap();

        let after = tree.read_project("site").unwrap();
        assert_eq!(
            after.targets["e2e"].option("config"),
            Some(&json!("apps/site/playwright.config.ts"))
        );
        for name in ["e2e-cypress", "other-runner", "no-options", "lint"] {
            assert_eq!(after.targets[name], before.targets[name], "target {name}");
        }
    }

    #[test]
    fn test_failed_project_does_not_stop_the_pass() {
        let tmp = scenario();
        fs::create_dir_all(tmp.path().join("apps/broken")).unwrap();
        fs::write(tmp.path().join("apps/broken/project.json"), "{ \"targets\": ").unwrap();
        let mut tree = open(&tmp);

        let report = update(&mut tree).unwrap();
        assert_eq!(report.updated, ["a"]);
        assert_eq!(report.unchanged, ["b"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "apps-broken");
        assert!(!report.is_success());
    }

    #[test]
    fn test_write_failure_does_not_stop_the_pass() {
        let tmp = scenario();
        write_json(
            tmp.path(),
            "apps/c/project.json",
            &json!({
                "name": "c",
                "targets": { "e2e": legacy_target(json!({ "runner": "playwright" })) }
            }),
        );
        let c_before = fs::read_to_string(tmp.path().join("apps/c/project.json")).unwrap();
        let mut tree = open(&tmp);
        tree.read_only.push("a".into());

        let report = update(&mut tree).unwrap();
        assert_eq!(report.updated, ["c"]);
        assert_eq!(report.unchanged, ["b"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "a");
        assert!(report.failed[0].1.contains("read-only"));
        assert!(!report.is_success());
        assert_eq!(tree.updates, ["c"]);

        let c_after = fs::read_to_string(tmp.path().join("apps/c/project.json")).unwrap();
        assert_ne!(c_before, c_after);
        assert!(c_after.contains(NEW_RUNNER));
    }

    #[test]
    fn test_rewrite_only_touches_options() {
        let tmp = TempDir::new().unwrap();
        let original = r#"{
  "$schema": "../../node_modules/nx/schemas/project-schema.json",
  "name": "shop-e2e",
  "root": "apps/shop-e2e",
  "implicitDependencies": [
    "shop"
  ],
  "sourceRoot": "apps/shop-e2e/src",
  "projectType": "application",
  "targets": {
    "e2e": {
      "outputs": [
        "{workspaceRoot}/dist/.playwright/apps/shop-e2e"
      ],
      "executor": "@nx-extend/e2e-runner:run",
      "options": {
        "runner": "playwright",
        "targets": [
          {
            "target": "shop:serve",
            "checkUrl": "http://localhost:4200/"
          }
        ]
      }
    },
    "lint": {
      "executor": "@nx/eslint:lint"
    }
  },
  "tags": []
}
"#;
        fs::create_dir_all(tmp.path().join("apps/shop-e2e")).unwrap();
        fs::write(tmp.path().join("apps/shop-e2e/project.json"), original).unwrap();
        touch(tmp.path(), "apps/shop-e2e/playwright.config.ts");
        let mut tree = open(&tmp);

        update(&mut tree).unwrap();

        let expected = original.replace(
            r#""runner": "playwright","#,
            r#""runner": "@nx/playwright",
        "config": "apps/shop-e2e/playwright.config.ts","#,
        );
        let written = fs::read_to_string(tmp.path().join("apps/shop-e2e/project.json")).unwrap();
        assert_eq!(written, expected);
    }

    #[test]
    fn test_empty_workspace() {
        let tmp = TempDir::new().unwrap();
        let mut tree = open(&tmp);
        let report = update(&mut tree).unwrap();
        assert_eq!(report.total(), 0);
        assert!(tree.updates.is_empty());
    }

    #[test]
    fn test_predicate() {
        let legacy: TargetConfiguration =
            serde_json::from_value(legacy_target(json!({ "runner": "playwright" }))).unwrap();
        assert!(is_legacy_playwright(&legacy));

        let migrated: TargetConfiguration =
            serde_json::from_value(legacy_target(json!({ "runner": NEW_RUNNER }))).unwrap();
        assert!(!is_legacy_playwright(&migrated));

        let non_string: TargetConfiguration =
            serde_json::from_value(legacy_target(json!({ "runner": true }))).unwrap();
        assert!(!is_legacy_playwright(&non_string));
    }
}
