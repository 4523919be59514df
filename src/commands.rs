// src/commands.rs
//! Command handlers for the cookbook CLI

use anyhow::{Context, Result, bail};
use cookbook::recipe::kitchen::Invocation;
use cookbook::{
    BuildSpec, Kitchen, KitchenConfig, Parallelism, RecipeRegistry, RecordingTools, Step,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Options for `cookbook install`
pub struct InstallOptions {
    pub spec: String,
    pub source_dir: Option<PathBuf>,
    pub prefix: Option<PathBuf>,
    pub root: PathBuf,
    pub jobs: Option<u32>,
    pub make: String,
    pub dry_run: bool,
}

/// Built-in recipes plus any found in `extra`
pub fn load_registry(extra: Option<&Path>) -> Result<RecipeRegistry> {
    let mut registry = RecipeRegistry::builtin().context("Failed to load built-in recipes")?;
    if let Some(dir) = extra {
        registry
            .load_dir(dir)
            .with_context(|| format!("Failed to load recipes from {}", dir.display()))?;
    }
    Ok(registry)
}

pub fn cmd_list(registry: &RecipeRegistry) -> Result<()> {
    if registry.is_empty() {
        println!("No recipes registered");
        return Ok(());
    }

    for entry in registry.iter() {
        let recipe = entry.recipe();
        let newest = recipe
            .preferred_version()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<20} {:<12} {}", recipe.name(), newest, entry.procedure().name());
    }
    Ok(())
}

pub fn cmd_info(registry: &RecipeRegistry, name: &str) -> Result<()> {
    let entry = registry.lookup(name)?;
    let recipe = entry.recipe();

    println!("Package: {}", recipe.name());
    if let Some(summary) = &recipe.package.summary {
        println!("  Summary: {}", summary);
    }
    if let Some(homepage) = recipe.homepage() {
        println!("  Homepage: {}", homepage);
    }
    if let Some(license) = &recipe.package.license {
        println!("  License: {}", license);
    }
    println!("  URL template: {}", recipe.url_template());
    println!("  Procedure: {}", entry.procedure().name());
    if let Some(serial) = &recipe.build.serial_install {
        println!("  Serial install: {}", serial.reason);
    }
    println!("  Versions:");
    for version in recipe.sorted_versions() {
        let sum = recipe.checksum(version.as_str()).unwrap_or("-");
        println!("    {:<12} {}", version, sum);
    }
    Ok(())
}

pub fn cmd_url(registry: &RecipeRegistry, name: &str, version: Option<&str>) -> Result<()> {
    let recipe = registry.lookup(name)?.recipe();
    let version = match version {
        Some(v) => v.to_string(),
        None => recipe
            .preferred_version()
            .map(|v| v.to_string())
            .with_context(|| format!("Recipe {} lists no versions", name))?,
    };

    println!("{}", recipe.url_for_version(&version)?);
    Ok(())
}

pub fn cmd_install(registry: RecipeRegistry, opts: InstallOptions) -> Result<()> {
    let mut config = KitchenConfig::with_install_root(&opts.root).make_program(opts.make);
    if let Some(jobs) = opts.jobs {
        config = config.jobs(jobs);
    }
    if opts.dry_run {
        config.create_prefix = false;
    }

    let mut spec = BuildSpec::parse(&opts.spec)?;
    if let Some(prefix) = opts.prefix {
        spec = spec.with_prefix(prefix);
    }

    let kitchen = Kitchen::new(config, registry);

    if opts.dry_run {
        let mut tools = RecordingTools::new();
        let result = kitchen.install(&spec, &mut tools)?;
        println!("Would install {} into {}:", result.spec, result.prefix.display());
        let jobs = kitchen.config().jobs;
        for invocation in tools.invocations() {
            println!("  {}", describe(invocation, jobs));
        }
        return Ok(());
    }

    let Some(source_dir) = opts.source_dir else {
        bail!("--source-dir is required unless --dry-run is given");
    };

    let mut tools = kitchen.system_tools(&source_dir);
    let outcome = kitchen.install(&spec, &mut tools);
    info!("Build log:\n{}", tools.log());
    let result = outcome?;

    println!("Installed {} into {}", result.spec, result.prefix.display());
    Ok(())
}

fn describe(invocation: &Invocation, jobs: u32) -> String {
    let jobs = invocation.parallelism.jobs(jobs);
    match invocation.step {
        Step::Configure => format!("sh ./configure {}", invocation.args.join(" ")),
        Step::Build => format!("make -j{}", jobs),
        Step::Install if invocation.parallelism == Parallelism::Serial => {
            format!("make -j{} install (serial)", jobs)
        }
        Step::Install => format!("make -j{} install", jobs),
    }
}
