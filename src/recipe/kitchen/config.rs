// src/recipe/kitchen/config.rs

//! Configuration types for the Kitchen

use std::path::{Path, PathBuf};

/// Configuration for the Kitchen
#[derive(Debug, Clone)]
pub struct KitchenConfig {
    /// Root under which default prefixes are laid out as `<root>/<name>/<version>`
    pub install_root: PathBuf,
    /// Number of parallel jobs for steps that allow parallelism
    pub jobs: u32,
    /// Make program, looked up on PATH unless it contains a slash
    pub make_program: String,
    /// Create the prefix directory before running the procedure
    pub create_prefix: bool,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        let jobs = std::thread::available_parallelism()
            .map(|p| p.get() as u32)
            .unwrap_or(4);

        Self {
            install_root: PathBuf::from("/opt"),
            jobs,
            make_program: "make".to_string(),
            create_prefix: true,
        }
    }
}

impl KitchenConfig {
    /// Default configuration with a different install root
    pub fn with_install_root(root: &Path) -> Self {
        Self {
            install_root: root.to_path_buf(),
            ..Self::default()
        }
    }

    /// Configuration for planning only: nothing is created on disk
    pub fn dry_run() -> Self {
        Self {
            create_prefix: false,
            ..Self::default()
        }
    }

    /// Override the ambient job count; zero is treated as one
    pub fn jobs(mut self, jobs: u32) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Override the make program
    pub fn make_program(mut self, make: impl Into<String>) -> Self {
        self.make_program = make.into();
        self
    }

    /// Default prefix for a package version
    pub fn prefix_for(&self, name: &str, version: &str) -> PathBuf {
        self.install_root.join(name).join(version)
    }
}
