//! # Devkit
//!
//! Workspace model and storage shared by the nxext plugins.
//!
//! This crate provides:
//! - The persisted project and target configuration types
//! - The [`Tree`] trait: read, enumerate and update projects in a workspace
//! - [`FsTree`], a file-backed tree over `project.json` files
//! - [`DryRunTree`], a tree wrapper that records changes instead of writing
//! - Name normalization and path helpers matching the build tool's conventions
//! - Workspace layout (`nx.json`), migration reports and executor context
//!
//! ## Example
//!
//! ```no_run
//! use devkit::{FsTree, Tree};
//!
//! let tree = FsTree::open("/path/to/workspace")?;
//! for name in tree.project_names()? {
//!     let project = tree.read_project(&name)?;
//!     println!("{name}: {} targets", project.targets.len());
//! }
//! # Ok::<(), devkit::Error>(())
//! ```
//!
//! Plugins take `&mut impl Tree` (or `&mut dyn Tree`) rather than touching the
//! filesystem, so the same generator or migration runs for real, as a dry
//! run, or against a test fixture.

mod dry_run;
mod error;
mod executor;
mod layout;
mod migration;
mod names;
pub mod package_json;
mod probe;
mod tree;
mod types;

pub use dry_run::{Change, DryRunTree};
pub use error::{Error, Result};
pub use executor::{ExecutorContext, ExecutorResult};
pub use layout::{NX_JSON, WorkspaceLayout, workspace_layout};
pub use migration::{Migration, MigrationReport};
pub use names::{file_name, join_path_fragments};
pub use probe::find_config_file;
pub use tree::{FsTree, PROJECT_FILE, Tree, serialize_project};
pub use types::{Options, ProjectConfiguration, ProjectType, TargetConfiguration};
