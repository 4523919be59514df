// src/recipe/mod.rs

//! Recipe system for building packages from source
//!
//! A recipe pairs a declarative record with an install procedure:
//! - identity metadata (name, homepage)
//! - a URL template for source archives
//! - the known versions and their archive checksums
//! - build instructions selecting and parameterising the procedure
//!
//! # Example Recipe
//!
//! ```toml
//! [package]
//! name = "libelf"
//! homepage = "http://www.mr511.de/software/english.html"
//! url = "http://www.mr511.de/software/libelf-%(version)s.tar.gz"
//!
//! [versions]
//! "0.8.13" = "4136d7b4c04df68b686570afa26988ac"
//!
//! [build]
//! configure = ["--prefix=%(prefix)s", "--enable-shared"]
//!
//! [build.serial_install]
//! reason = "install rules race on mkdir"
//! ```
//!
//! Recipes live in a [`RecipeRegistry`]; a [`Kitchen`] resolves a
//! [`BuildSpec`] against the registry and runs the recipe's procedure with a
//! [`BuildTools`] implementation.

pub mod builtin;
mod format;
pub mod kitchen;
pub mod parser;
mod registry;
mod spec;
pub mod url;

pub use format::{BuildSection, BuildSystem, PackageSection, Recipe, SerialInstall};
pub use kitchen::{
    BuildTools, InstallProcedure, InstallResult, Kitchen, KitchenConfig, Parallelism,
    RecordingTools, Step, SystemTools,
};
pub use parser::{load_recipe, parse_recipe, parse_recipe_file, validate_recipe};
pub use registry::{RecipeEntry, RecipeRegistry};
pub use spec::{BuildSpec, ResolvedSpec};
