//! # e2e-runner
//!
//! Configuration migrations for the e2e-runner plugin.
//!
//! Each migration rewrites the `project.json` files of a workspace from one
//! plugin schema version to the next. Migrations only touch projects that
//! need changes and are safe to run more than once.

pub mod migrations;

use devkit::Migration;

/// Package name used to identify this plugin's migrations
pub const PACKAGE: &str = "e2e-runner";

/// All migrations shipped by this plugin, oldest first
pub const MIGRATIONS: &[Migration] = &[Migration {
    package: PACKAGE,
    version: "7.0.0",
    description: "Move Playwright targets to the @nx/playwright runner",
    run: migrations::update_7_0_0::update,
}];
