//! `init` generator: scaffold the configuration of a Cloud Function project

use crate::error::{Error, Result};
use devkit::{
    Options, ProjectConfiguration, ProjectType, TargetConfiguration, Tree, file_name,
    join_path_fragments, package_json, workspace_layout,
};
use serde::Deserialize;
use serde_json::{Value, json};

const FUNCTIONS_FRAMEWORK: (&str, &str) = ("@google-cloud/functions-framework", "latest");
const PACKAGE_JSON: &str = "package.json";

/// User input for the generator
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitSchema {
    pub name: String,
    /// Parent directory under the apps dir
    #[serde(default)]
    pub directory: Option<String>,
    /// Comma-separated tags
    #[serde(default)]
    pub tags: Option<String>,
}

/// Derived names and locations for the new project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSchema {
    pub project_name: String,
    pub project_root: String,
    pub project_directory: String,
    pub parsed_tags: Vec<String>,
}

/// What the generator did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitResult {
    pub project_name: String,
    pub project_root: String,
    /// Whether `package.json` gained the functions framework
    pub dependencies_added: bool,
}

/// Derive the project name, directory, root and tags from user input
pub fn normalize_options(apps_dir: &str, schema: &InitSchema) -> Result<NormalizedSchema> {
    let name = file_name(schema.name.trim());
    if name.is_empty() {
        return Err(Error::InvalidName(schema.name.clone()));
    }

    let project_directory = match schema.directory.as_deref().map(str::trim) {
        Some(directory) if !directory.is_empty() => {
            join_path_fragments(&[&file_name(directory), &name])
        }
        _ => name,
    };
    let project_name = project_directory.replace('/', "-");
    let project_root = join_path_fragments(&[apps_dir, &project_directory]);
    let parsed_tags = schema
        .tags
        .as_deref()
        .filter(|tags| !tags.is_empty())
        .map(|tags| tags.split(',').map(|t| t.trim().to_string()).collect())
        .unwrap_or_default();

    Ok(NormalizedSchema {
        project_name,
        project_root,
        project_directory,
        parsed_tags,
    })
}

/// Build the project configuration for a normalized schema
pub fn project_configuration(options: &NormalizedSchema) -> ProjectConfiguration {
    let root = options.project_root.as_str();

    let mut project = ProjectConfiguration::new(root);
    project.source_root = Some(format!("{root}/src"));
    project.project_type = Some(ProjectType::Application);
    project.tags = options.parsed_tags.clone();

    project.targets.insert(
        "lint".into(),
        TargetConfiguration::new("@nrwl/linter:eslint"),
    );
    project.targets.insert(
        "test".into(),
        TargetConfiguration::new("@nrwl/jest:jest").with_options(object(json!({
            "jestConfig": format!("{root}/jest.config.js"),
            "passWithNoTests": true
        }))),
    );
    project.targets.insert(
        "build".into(),
        TargetConfiguration::new("@nx-extend/gcp-functions:build")
            .with_options(object(json!({
                "generateLockFile": true,
                "outputPath": format!("dist/{root}"),
                "main": format!("{root}/src/main.ts"),
                "tsConfig": format!("{root}/tsconfig.app.json"),
                "assets": []
            })))
            .with_configuration(
                "production",
                object(json!({
                    "optimization": true,
                    "extractLicenses": false,
                    "inspect": false
                })),
            ),
    );
    project.targets.insert(
        "deploy".into(),
        TargetConfiguration::new("@nx-extend/gcp-functions:deploy").with_options(object(json!({
            "functionName": options.project_name,
            "envVarsFile": format!("{root}/src/environments/production.yaml")
        }))),
    );

    project
}

/// Add a Cloud Function project to the workspace
pub fn init(tree: &mut dyn Tree, schema: &InitSchema) -> Result<InitResult> {
    let layout = workspace_layout(&*tree)?;
    let options = normalize_options(&layout.apps_dir, schema)?;
    log::debug!(
        "Generating function '{}' at {}",
        options.project_name,
        options.project_root
    );

    tree.add_project(&options.project_name, &project_configuration(&options))?;

    let dependencies_added = if tree.exists(PACKAGE_JSON) {
        package_json::add_dependencies(tree, PACKAGE_JSON, &[], &[FUNCTIONS_FRAMEWORK])?
    } else {
        log::warn!("No {PACKAGE_JSON} at the workspace root, skipping dependencies");
        false
    };

    Ok(InitResult {
        project_name: options.project_name,
        project_root: options.project_root,
        dependencies_added,
    })
}

fn object(value: Value) -> Options {
    match value {
        Value::Object(map) => map,
        _ => Options::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devkit::FsTree;
    use std::fs;
    use tempfile::TempDir;

    fn schema(name: &str, directory: Option<&str>, tags: Option<&str>) -> InitSchema {
        InitSchema {
            name: name.to_string(),
            directory: directory.map(String::from),
            tags: tags.map(String::from),
        }
    }

    #[test]
    fn test_normalize_with_directory() {
        let normalized =
            normalize_options("apps", &schema("myFunction", Some("Cloud"), None)).unwrap();
        assert_eq!(normalized.project_directory, "cloud/my-function");
        assert_eq!(normalized.project_name, "cloud-my-function");
        assert_eq!(normalized.project_root, "apps/cloud/my-function");
        assert!(normalized.parsed_tags.is_empty());
    }

    #[test]
    fn test_normalize_without_directory() {
        let normalized = normalize_options("services", &schema("Hello World", None, None)).unwrap();
        assert_eq!(normalized.project_directory, "hello-world");
        assert_eq!(normalized.project_name, "hello-world");
        assert_eq!(normalized.project_root, "services/hello-world");
    }

    #[test]
    fn test_normalize_tags() {
        let normalized = normalize_options("apps", &schema("fn", None, Some("a, b ,c,"))).unwrap();
        assert_eq!(normalized.parsed_tags, ["a", "b", "c", ""]);

        let normalized = normalize_options("apps", &schema("fn", None, Some(""))).unwrap();
        assert!(normalized.parsed_tags.is_empty());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let err = normalize_options("apps", &schema("  ", None, None)).unwrap_err();
        assert!(matches!(err, Error::InvalidName(_)));
    }

    #[test]
    fn test_project_configuration_targets() {
        let normalized = normalize_options("apps", &schema("api", None, Some("scope:api"))).unwrap();
        let project = project_configuration(&normalized);

        let names: Vec<_> = project.targets.keys().map(String::as_str).collect();
        assert_eq!(names, ["lint", "test", "build", "deploy"]);
        assert_eq!(project.source_root.as_deref(), Some("apps/api/src"));
        assert_eq!(project.tags, ["scope:api"]);

        let build = &project.targets["build"];
        assert_eq!(build.option("outputPath"), Some(&json!("dist/apps/api")));
        assert_eq!(
            build.configurations.as_ref().unwrap()["production"]["optimization"],
            json!(true)
        );

        let deploy = &project.targets["deploy"];
        assert_eq!(deploy.option("functionName"), Some(&json!("api")));
        assert_eq!(
            deploy.option("envVarsFile"),
            Some(&json!("apps/api/src/environments/production.yaml"))
        );
    }

    #[test]
    fn test_init_writes_project_and_dependency() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("nx.json"),
            r#"{ "workspaceLayout": { "appsDir": "functions" } }"#,
        )
        .unwrap();
        fs::write(tmp.path().join("package.json"), r#"{ "name": "ws" }"#).unwrap();
        let mut tree = FsTree::open(tmp.path()).unwrap();

        let result = init(&mut tree, &schema("signup", Some("auth"), None)).unwrap();
        assert_eq!(result.project_name, "auth-signup");
        assert_eq!(result.project_root, "functions/auth/signup");
        assert!(result.dependencies_added);

        let project = tree.read_project("auth-signup").unwrap();
        assert_eq!(project.root, "functions/auth/signup");
        assert_eq!(project.project_type, Some(ProjectType::Application));

        let package = fs::read_to_string(tmp.path().join("package.json")).unwrap();
        assert!(package.contains("@google-cloud/functions-framework"));
    }

    #[test]
    fn test_init_without_package_json() {
        let tmp = TempDir::new().unwrap();
        let mut tree = FsTree::open(tmp.path()).unwrap();

        let result = init(&mut tree, &schema("fn", None, None)).unwrap();
        assert!(!result.dependencies_added);
        assert!(tmp.path().join("apps/fn/project.json").exists());
    }

    #[test]
    fn test_init_twice_fails() {
        let tmp = TempDir::new().unwrap();
        let mut tree = FsTree::open(tmp.path()).unwrap();

        init(&mut tree, &schema("fn", None, None)).unwrap();
        let err = init(&mut tree, &schema("fn", None, None)).unwrap_err();
        assert!(matches!(
            err,
            Error::Workspace(devkit::Error::ProjectExists(_))
        ));
    }
}
