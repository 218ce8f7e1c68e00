//! # pulumi
//!
//! Pulumi plugin.
//!
//! Provides the `up` executor, which runs `pulumi up` for a project from its
//! source directory with the terminal attached.

mod error;
pub mod executors;

pub use error::{Error, Result};
