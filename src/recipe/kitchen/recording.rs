// src/recipe/kitchen/recording.rs

//! Build tools that record calls instead of running anything
//!
//! Used by tests and by `cookbook install --dry-run`.

use super::tools::{BuildTools, Parallelism, Step};
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// A single recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub step: Step,
    /// Configure arguments; empty for build and install
    pub args: Vec<String>,
    pub parallelism: Parallelism,
}

/// Records every step in order, optionally failing one of them
#[derive(Debug, Default)]
pub struct RecordingTools {
    invocations: Vec<Invocation>,
    environment: BTreeMap<String, String>,
    fail_on: Option<(Step, i32)>,
}

impl RecordingTools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `step` fail with the given exit code once reached
    pub fn failing_at(step: Step, code: i32) -> Self {
        Self {
            fail_on: Some((step, code)),
            ..Self::default()
        }
    }

    /// Calls made so far, in order
    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    /// Steps called so far, in order
    pub fn steps(&self) -> Vec<Step> {
        self.invocations.iter().map(|i| i.step).collect()
    }

    /// Environment handed over by the procedure
    pub fn environment(&self) -> &BTreeMap<String, String> {
        &self.environment
    }

    fn record(&mut self, step: Step, args: &[String], parallelism: Parallelism) -> Result<()> {
        self.invocations.push(Invocation {
            step,
            args: args.to_vec(),
            parallelism,
        });

        match self.fail_on {
            Some((failing, code)) if failing == step => Err(Error::BuildFailed {
                step,
                code: Some(code),
                stderr: format!("simulated {} failure", step),
            }),
            _ => Ok(()),
        }
    }
}

impl BuildTools for RecordingTools {
    fn run_configure(&mut self, args: &[String]) -> Result<()> {
        self.record(Step::Configure, args, Parallelism::Default)
    }

    fn run_build(&mut self, parallelism: Parallelism) -> Result<()> {
        self.record(Step::Build, &[], parallelism)
    }

    fn run_install(&mut self, parallelism: Parallelism) -> Result<()> {
        self.record(Step::Install, &[], parallelism)
    }

    fn set_environment(&mut self, env: &BTreeMap<String, String>) {
        self.environment
            .extend(env.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut tools = RecordingTools::new();
        tools.run_configure(&["--prefix=/x".to_string()]).unwrap();
        tools.run_build(Parallelism::Default).unwrap();
        tools.run_install(Parallelism::Serial).unwrap();

        assert_eq!(tools.steps(), vec![Step::Configure, Step::Build, Step::Install]);
        assert_eq!(tools.invocations()[0].args, vec!["--prefix=/x"]);
        assert_eq!(tools.invocations()[2].parallelism, Parallelism::Serial);
    }

    #[test]
    fn test_failing_step() {
        let mut tools = RecordingTools::failing_at(Step::Build, 2);
        assert!(tools.run_configure(&[]).is_ok());
        let err = tools.run_build(Parallelism::Default).unwrap_err();
        assert!(matches!(
            err,
            Error::BuildFailed {
                step: Step::Build,
                code: Some(2),
                ..
            }
        ));
        // The failing call itself is still recorded
        assert_eq!(tools.steps(), vec![Step::Configure, Step::Build]);
    }
}
