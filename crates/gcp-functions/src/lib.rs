//! # gcp-functions
//!
//! Google Cloud Functions plugin.
//!
//! Provides the `init` generator, which adds a function project with lint,
//! test, build and deploy targets and registers the functions framework as
//! a workspace dev dependency.

mod error;
pub mod generators;

pub use error::{Error, Result};
