// src/recipe/kitchen/system.rs

//! Build tools backed by real subprocesses

use super::config::KitchenConfig;
use super::tools::{BuildTools, Parallelism, Step};
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Runs configure and make inside an unpacked source tree
pub struct SystemTools {
    source_dir: PathBuf,
    jobs: u32,
    make_program: String,
    env: Vec<(String, String)>,
    log: String,
}

impl SystemTools {
    pub fn new(source_dir: &Path, config: &KitchenConfig) -> Self {
        Self {
            source_dir: source_dir.to_path_buf(),
            jobs: config.jobs,
            make_program: config.make_program.clone(),
            env: Vec::new(),
            log: String::new(),
        }
    }

    /// Accumulated output of every step run so far
    pub fn log(&self) -> &str {
        &self.log
    }

    fn check_source_dir(&self) -> Result<()> {
        if !self.source_dir.is_dir() {
            return Err(Error::NotFound(format!(
                "Source directory not found: {}",
                self.source_dir.display()
            )));
        }
        Ok(())
    }

    fn make(&self) -> Result<PathBuf> {
        which::which(&self.make_program).map_err(|e| {
            Error::NotFound(format!("Make program '{}': {}", self.make_program, e))
        })
    }

    /// A command running in the source tree with the recipe environment
    fn command(&self, program: impl AsRef<OsStr>) -> Command {
        let mut cmd = Command::new(program);
        cmd.current_dir(&self.source_dir)
            .envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        cmd
    }

    fn make_command(&self, parallelism: Parallelism) -> Result<Command> {
        self.check_source_dir()?;
        let mut cmd = self.command(self.make()?);
        cmd.arg(format!("-j{}", parallelism.jobs(self.jobs)));
        if parallelism == Parallelism::Serial {
            // Neither an inherited jobserver nor the recipe environment may
            // hand out extra slots
            cmd.env_remove("MAKEFLAGS").env_remove("MFLAGS");
        }
        Ok(cmd)
    }

    /// Run a build step
    fn run_step(&mut self, step: Step, mut cmd: Command) -> Result<()> {
        info!("Running {} step", step);
        debug!("Command: {:?}", cmd);

        let output = cmd
            .output()
            .map_err(|e| Error::IoError(format!("Failed to run {} step: {}", step, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        self.log_step_output(step, &stdout, &stderr);

        if !output.status.success() {
            return Err(Error::BuildFailed {
                step,
                code: output.status.code(),
                stderr: stderr.into_owned(),
            });
        }

        Ok(())
    }

    /// Log step output (stdout/stderr) with a step header
    fn log_step_output(&mut self, step: Step, stdout: &str, stderr: &str) {
        self.log.push_str(&format!("=== {} ===\n", step));
        for chunk in [stdout, stderr] {
            if !chunk.is_empty() {
                self.log.push_str(chunk);
                self.log.push('\n');
            }
        }
    }
}

impl BuildTools for SystemTools {
    fn run_configure(&mut self, args: &[String]) -> Result<()> {
        self.check_source_dir()?;
        let script = self.source_dir.join("configure");
        if !script.is_file() {
            return Err(Error::NotFound(format!(
                "No configure script in {}",
                self.source_dir.display()
            )));
        }

        // Configure scripts are POSIX sh; running through sh avoids
        // depending on the executable bit surviving extraction.
        let mut cmd = self.command("sh");
        cmd.arg("./configure").args(args);
        self.run_step(Step::Configure, cmd)
    }

    fn run_build(&mut self, parallelism: Parallelism) -> Result<()> {
        let cmd = self.make_command(parallelism)?;
        self.run_step(Step::Build, cmd)
    }

    fn run_install(&mut self, parallelism: Parallelism) -> Result<()> {
        let mut cmd = self.make_command(parallelism)?;
        cmd.arg("install");
        self.run_step(Step::Install, cmd)
    }

    fn set_environment(&mut self, env: &BTreeMap<String, String>) {
        self.env
            .extend(env.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}
