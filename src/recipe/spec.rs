// src/recipe/spec.rs

//! Build specs: which package, which version, where to

use crate::error::{Error, Result};
use crate::version::Version;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A build request as a user or orchestrator writes it
///
/// Format: `name` or `name@version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSpec {
    pub name: String,
    /// Exact version; `None` selects the recipe's newest version
    pub version: Option<String>,
    /// Explicit prefix; `None` uses the kitchen's layout
    pub prefix: Option<PathBuf>,
}

impl BuildSpec {
    /// Request the preferred version of a package
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            prefix: None,
        }
    }

    /// Pin an exact version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Install into this prefix instead of the default layout
    pub fn with_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Parse `name` or `name@version`
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let (name, version) = match s.split_once('@') {
            Some((name, version)) => (name, Some(version)),
            None => (s, None),
        };

        if name.is_empty() {
            return Err(Error::ParseError(format!("Spec '{}' has no package name", s)));
        }

        let mut spec = Self::new(name);
        if let Some(version) = version {
            Version::parse(version)?;
            spec.version = Some(version.to_string());
        }
        Ok(spec)
    }
}

impl FromStr for BuildSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for BuildSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}@{}", self.name, v),
            None => f.write_str(&self.name),
        }
    }
}

/// A spec after the version has been selected against a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpec {
    pub name: String,
    pub version: Version,
}

impl fmt::Display for ResolvedSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}
