// src/recipe/kitchen/procedure.rs

//! Install procedures: how a recipe turns a source tree into a prefix

use super::tools::{BuildTools, Parallelism};
use crate::error::Result;
use crate::recipe::format::{BuildSystem, Recipe};
use crate::recipe::spec::ResolvedSpec;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// The imperative half of a recipe
///
/// Implementations hold no state; the same procedure is invoked once per
/// build attempt. The first failing step aborts the procedure and its error
/// is returned unchanged.
pub trait InstallProcedure: Send + Sync {
    /// Short name for logs and `cookbook info`
    fn name(&self) -> &'static str;

    /// Build and install `spec` into `prefix`
    fn install(
        &self,
        recipe: &Recipe,
        spec: &ResolvedSpec,
        prefix: &Path,
        tools: &mut dyn BuildTools,
    ) -> Result<()>;
}

/// Pick the procedure for a recipe's declared build system
pub fn procedure_for(system: BuildSystem) -> Arc<dyn InstallProcedure> {
    match system {
        BuildSystem::Autotools => Arc::new(AutotoolsProcedure),
        BuildSystem::Makefile => Arc::new(MakefileProcedure),
    }
}

/// `./configure <args> && make && make install`
#[derive(Debug, Clone, Copy, Default)]
pub struct AutotoolsProcedure;

impl InstallProcedure for AutotoolsProcedure {
    fn name(&self) -> &'static str {
        "autotools"
    }

    fn install(
        &self,
        recipe: &Recipe,
        spec: &ResolvedSpec,
        prefix: &Path,
        tools: &mut dyn BuildTools,
    ) -> Result<()> {
        let args = recipe.configure_args(spec.version.as_str(), prefix);
        debug!("Configure arguments: {}", args.join(" "));

        tools.run_configure(&args)?;
        make_and_install(recipe, tools)
    }
}

/// `make && make install` for trees that ship a ready Makefile
#[derive(Debug, Clone, Copy, Default)]
pub struct MakefileProcedure;

impl InstallProcedure for MakefileProcedure {
    fn name(&self) -> &'static str {
        "makefile"
    }

    fn install(
        &self,
        recipe: &Recipe,
        _spec: &ResolvedSpec,
        _prefix: &Path,
        tools: &mut dyn BuildTools,
    ) -> Result<()> {
        make_and_install(recipe, tools)
    }
}

fn make_and_install(recipe: &Recipe, tools: &mut dyn BuildTools) -> Result<()> {
    tools.run_build(Parallelism::Default)?;

    let parallelism = recipe.install_parallelism();
    if let Some(serial) = &recipe.build.serial_install {
        info!(
            "Installing {} with a single job: {}",
            recipe.name(),
            serial.reason
        );
    }
    tools.run_install(parallelism)
}
