// src/recipe/format.rs

//! Recipe file format definitions
//!
//! A recipe is a TOML file with identity metadata, the table of known
//! versions and their archive checksums, and a build section that picks and
//! parameterises the install procedure.

use crate::error::Result;
use crate::recipe::kitchen::Parallelism;
use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A complete package recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Package metadata
    pub package: PackageSection,

    /// Known versions mapped to their archive checksums
    #[serde(default)]
    pub versions: BTreeMap<String, String>,

    /// Build instructions
    #[serde(default)]
    pub build: BuildSection,

    /// Variables for substitution (optional)
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

impl Recipe {
    /// Package name
    pub fn name(&self) -> &str {
        &self.package.name
    }

    /// Informational homepage, if any
    pub fn homepage(&self) -> Option<&str> {
        self.package.homepage.as_deref()
    }

    /// The archive URL template, placeholders unexpanded
    pub fn url_template(&self) -> &str {
        &self.package.url
    }

    /// Checksum recorded for a version
    pub fn checksum(&self, version: &str) -> Option<&str> {
        self.versions.get(version).map(String::as_str)
    }

    /// Whether a version is listed in `[versions]`
    pub fn has_version(&self, version: &str) -> bool {
        self.versions.contains_key(version)
    }

    /// Known versions, newest first
    ///
    /// Keys that are not valid version identifiers are skipped; the parser
    /// rejects those before a recipe reaches a registry.
    pub fn sorted_versions(&self) -> Vec<Version> {
        let mut versions: Vec<Version> = self
            .versions
            .keys()
            .filter_map(|v| Version::parse(v).ok())
            .collect();
        versions.sort_by(|a, b| b.cmp(a));
        versions
    }

    /// The version chosen when a spec names none: the highest known one
    pub fn preferred_version(&self) -> Option<Version> {
        self.sorted_versions().into_iter().next()
    }

    /// Substitute variables in a string
    ///
    /// Replaces `%(name)s` patterns with their values from:
    /// 1. Built-in variables (name, version, prefix)
    /// 2. Custom variables from the [variables] section
    pub fn substitute(&self, template: &str, version: &str, prefix: &Path) -> String {
        let mut result = template.to_string();

        result = result.replace("%(version)s", version);
        result = result.replace("%(name)s", &self.package.name);
        result = result.replace("%(prefix)s", &prefix.to_string_lossy());

        for (key, value) in &self.variables {
            result = result.replace(&format!("%({})s", key), value);
        }

        result
    }

    /// Concrete archive URL for a version
    pub fn url_for_version(&self, version: &str) -> Result<String> {
        super::url::url_for_version(self, version)
    }

    /// Arguments for the configure step, placeholders expanded
    ///
    /// A recipe without an explicit list gets `--prefix=<prefix>`.
    pub fn configure_args(&self, version: &str, prefix: &Path) -> Vec<String> {
        if self.build.configure.is_empty() {
            return vec![format!("--prefix={}", prefix.display())];
        }

        self.build
            .configure
            .iter()
            .map(|arg| self.substitute(arg, version, prefix))
            .collect()
    }

    /// Concurrency for the install step
    pub fn install_parallelism(&self) -> Parallelism {
        if self.build.serial_install.is_some() {
            Parallelism::Serial
        } else {
            Parallelism::Default
        }
    }
}

/// Package metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSection {
    /// Package name, unique within a registry
    pub name: String,

    /// Homepage URL
    #[serde(default)]
    pub homepage: Option<String>,

    /// Archive URL template
    ///
    /// Supports `%(version)s` and `%(name)s` substitution.
    /// Example: `http://www.mr511.de/software/libelf-%(version)s.tar.gz`
    pub url: String,

    /// Short description
    #[serde(default)]
    pub summary: Option<String>,

    /// License identifier (SPDX)
    #[serde(default)]
    pub license: Option<String>,
}

/// How the install procedure drives the source tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuildSystem {
    /// `configure`, `make`, `make install`
    #[default]
    Autotools,
    /// `make`, `make install`; the tree ships a ready Makefile
    Makefile,
}

impl BuildSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildSystem::Autotools => "autotools",
            BuildSystem::Makefile => "makefile",
        }
    }
}

/// Build instructions section
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BuildSection {
    /// Build system driving the install procedure
    #[serde(default)]
    pub system: BuildSystem,

    /// Configure arguments
    ///
    /// Supports `%(prefix)s`, `%(version)s`, `%(name)s` and custom
    /// variables.
    #[serde(default)]
    pub configure: Vec<String>,

    /// Environment variables to set for every step
    #[serde(default)]
    pub environment: BTreeMap<String, String>,

    /// Run the install step with exactly one job
    ///
    /// Only for packages whose install rules are known to race; the
    /// reason is required so the exception stays attached to its cause.
    #[serde(default)]
    pub serial_install: Option<SerialInstall>,
}

/// A named exception forcing a sequential install step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialInstall {
    /// Why parallel install is unsafe for this package
    pub reason: String,
}
