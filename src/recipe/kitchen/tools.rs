// src/recipe/kitchen/tools.rs

//! The build tools capability handed to install procedures

use crate::error::Result;
use std::collections::BTreeMap;
use std::fmt;

/// One external step of an install procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Configure,
    Build,
    Install,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Configure => "configure",
            Step::Build => "build",
            Step::Install => "install",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many jobs a step may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Parallelism {
    /// Whatever the kitchen is configured for
    #[default]
    Default,
    /// Exactly one job, whatever the ambient setting
    Serial,
}

impl Parallelism {
    /// Number of jobs given the ambient job count
    pub fn jobs(&self, ambient: u32) -> u32 {
        match self {
            Parallelism::Default => ambient.max(1),
            Parallelism::Serial => 1,
        }
    }
}

/// External build helpers an install procedure may call
///
/// Procedures never spawn processes themselves. Production code passes
/// [`SystemTools`](super::SystemTools); tests pass
/// [`RecordingTools`](super::RecordingTools).
pub trait BuildTools {
    /// Run the source tree's configure script with these arguments
    fn run_configure(&mut self, args: &[String]) -> Result<()>;

    /// Run the default build target
    fn run_build(&mut self, parallelism: Parallelism) -> Result<()>;

    /// Run the install target
    fn run_install(&mut self, parallelism: Parallelism) -> Result<()>;

    /// Extra environment for every subsequent step
    fn set_environment(&mut self, _env: &BTreeMap<String, String>) {}
}
