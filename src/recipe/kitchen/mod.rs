// src/recipe/kitchen/mod.rs

//! Kitchen: where recipes are cooked into install prefixes
//!
//! The Kitchen sits between whoever asks for a build and a recipe's install
//! procedure. It:
//! - looks the recipe up in its registry
//! - selects the version (exact, or the newest known)
//! - computes and prepares the install prefix
//! - hands the procedure a [`BuildTools`] capability to do the work
//!
//! Fetching and verifying source archives happens before the Kitchen is
//! involved; it expects an unpacked source tree.

mod config;
mod procedure;
mod recording;
mod system;
mod tools;

pub use config::KitchenConfig;
pub use procedure::{AutotoolsProcedure, InstallProcedure, MakefileProcedure, procedure_for};
pub use recording::{Invocation, RecordingTools};
pub use system::SystemTools;
pub use tools::{BuildTools, Parallelism, Step};

use crate::error::{Error, Result};
use crate::recipe::registry::{RecipeEntry, RecipeRegistry};
use crate::recipe::spec::{BuildSpec, ResolvedSpec};
use crate::version::Version;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of a successful install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallResult {
    pub spec: ResolvedSpec,
    pub prefix: PathBuf,
}

/// A build request matched against the registry
#[derive(Debug)]
pub struct Plan<'a> {
    pub entry: &'a RecipeEntry,
    pub spec: ResolvedSpec,
    pub prefix: PathBuf,
}

/// The Kitchen: where recipes are cooked
pub struct Kitchen {
    pub(crate) config: KitchenConfig,
    registry: RecipeRegistry,
}

impl Kitchen {
    /// Create a new Kitchen over a registry
    pub fn new(config: KitchenConfig, registry: RecipeRegistry) -> Self {
        Self { config, registry }
    }

    /// Create a Kitchen with default configuration and the built-in recipes
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(KitchenConfig::default(), RecipeRegistry::builtin()?))
    }

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    pub fn registry(&self) -> &RecipeRegistry {
        &self.registry
    }

    /// Subprocess-backed tools for a source tree, using this kitchen's config
    pub fn system_tools(&self, source_dir: &Path) -> SystemTools {
        SystemTools::new(source_dir, &self.config)
    }

    /// Resolve a spec without running anything
    pub fn plan(&self, spec: &BuildSpec) -> Result<Plan<'_>> {
        let entry = self.registry.lookup(&spec.name)?;
        let recipe = entry.recipe();

        let version = match &spec.version {
            Some(v) if recipe.has_version(v) => Version::parse(v)?,
            Some(v) => {
                return Err(Error::UnknownVersion {
                    package: spec.name.clone(),
                    version: v.clone(),
                    known: known_versions(entry),
                });
            }
            None => recipe.preferred_version().ok_or_else(|| {
                Error::ParseError(format!("Recipe {} lists no versions", spec.name))
            })?,
        };

        let prefix = match &spec.prefix {
            Some(p) => p.clone(),
            None => self.config.prefix_for(&spec.name, version.as_str()),
        };
        if !prefix.is_absolute() {
            return Err(Error::InvalidPrefix {
                prefix: prefix.display().to_string(),
                reason: "prefix must be an absolute path".to_string(),
            });
        }

        Ok(Plan {
            entry,
            spec: ResolvedSpec {
                name: spec.name.clone(),
                version,
            },
            prefix,
        })
    }

    /// Build and install a spec
    ///
    /// The procedure's first failing step aborts the install; the error is
    /// returned as is. Nothing is retried.
    pub fn install(&self, spec: &BuildSpec, tools: &mut dyn BuildTools) -> Result<InstallResult> {
        let plan = self.plan(spec)?;
        let recipe = plan.entry.recipe();

        info!("Installing {} into {}", plan.spec, plan.prefix.display());

        if self.config.create_prefix {
            fs::create_dir_all(&plan.prefix).map_err(|e| Error::InvalidPrefix {
                prefix: plan.prefix.display().to_string(),
                reason: e.to_string(),
            })?;
        }

        if !recipe.build.environment.is_empty() {
            debug!(
                "Build environment: {}",
                recipe
                    .build
                    .environment
                    .keys()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            tools.set_environment(&recipe.build.environment);
        }

        plan.entry
            .procedure()
            .install(recipe, &plan.spec, &plan.prefix, tools)?;

        info!("Installed {}", plan.spec);
        Ok(InstallResult {
            spec: plan.spec,
            prefix: plan.prefix,
        })
    }
}

fn known_versions(entry: &RecipeEntry) -> String {
    entry
        .recipe()
        .sorted_versions()
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
