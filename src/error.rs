// src/error.rs

//! Error types for recipe loading and install procedures

use crate::recipe::kitchen::Step;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classes of failure, as seen by whoever drives an install
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed or inconsistent recipe data; detected before any step runs
    DataIntegrity,
    /// An external build step exited unsuccessfully
    BuildFailure,
    /// The host environment got in the way (permissions, disk, missing tools)
    Environment,
}

#[derive(Error, Debug)]
pub enum Error {
    /// I/O error from the standard library
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O failure with context
    #[error("I/O error: {0}")]
    IoError(String),

    /// Recipe file could not be parsed or failed validation
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A version key is not a valid version identifier
    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    /// A checksum value is not in a recognised format
    #[error("Invalid checksum for {package} {version}: {reason}")]
    InvalidChecksum {
        package: String,
        version: String,
        reason: String,
    },

    /// The requested version is not listed in the recipe
    #[error("Unknown version {version} for {package} (known: {known})")]
    UnknownVersion {
        package: String,
        version: String,
        known: String,
    },

    /// A recipe with the same name is already registered
    #[error("Recipe already registered: {0}")]
    AlreadyRegistered(String),

    /// Recipe, source tree or tool not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Install prefix is unusable
    #[error("Invalid install prefix '{prefix}': {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    /// An external build step failed
    #[error("{step} step failed with exit code {code:?}\nstderr: {stderr}")]
    BuildFailed {
        step: Step,
        code: Option<i32>,
        stderr: String,
    },
}

impl Error {
    /// Classify this error for the caller
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ParseError(_)
            | Self::InvalidVersion { .. }
            | Self::InvalidChecksum { .. }
            | Self::UnknownVersion { .. }
            | Self::AlreadyRegistered(_) => ErrorCategory::DataIntegrity,
            Self::BuildFailed { .. } => ErrorCategory::BuildFailure,
            Self::Io(_) | Self::IoError(_) | Self::NotFound(_) | Self::InvalidPrefix { .. } => {
                ErrorCategory::Environment
            }
        }
    }

    /// The build step that failed, if this is a build failure
    pub fn failed_step(&self) -> Option<Step> {
        match self {
            Self::BuildFailed { step, .. } => Some(*step),
            _ => None,
        }
    }
}
