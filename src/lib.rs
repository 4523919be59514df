// src/lib.rs

//! Cookbook: package recipes and their install procedures
//!
//! A recipe is a read-only record (name, homepage, source URL template,
//! known versions with their archive checksums) plus a procedure that runs
//! an external `configure && make && make install` sequence into a prefix.
//!
//! # Architecture
//!
//! - Recipes are TOML; built-in ones are compiled in
//! - A registry maps package names to recipe and procedure
//! - Procedures never spawn processes directly: they call a `BuildTools`
//!   capability, real subprocesses in production and a recorder in tests
//! - Downloading, checksum verification, dependency resolution and
//!   sandboxing belong to the caller

mod error;
pub mod hash;
pub mod recipe;
pub mod version;

pub use error::{Error, ErrorCategory, Result};
pub use hash::{Checksum, HashAlgorithm};
pub use recipe::{
    BuildSpec, BuildTools, InstallResult, Kitchen, KitchenConfig, Parallelism, Recipe,
    RecipeRegistry, RecordingTools, Step, SystemTools,
};
pub use version::Version;
