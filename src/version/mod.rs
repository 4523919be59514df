// src/version/mod.rs

//! Version identifiers used as keys of a recipe's `[versions]` table
//!
//! Upstream release numbers are not semver: `0.8.13`, `2.38`, `1.1.1w`,
//! `3.0.0-rc1` all occur. A version here is a dot/dash/underscore separated
//! list of segments, where each segment is a run of digits or a run of
//! letters. Ordering compares segments pairwise, numbers numerically and
//! letters lexically; a numeric segment sorts after an alphabetic one, and a
//! version that is a strict prefix of another sorts first.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Number(u64),
    Alpha(String),
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Number(a), Segment::Number(b)) => a.cmp(b),
            (Segment::Alpha(a), Segment::Alpha(b)) => a.cmp(b),
            (Segment::Number(_), Segment::Alpha(_)) => Ordering::Greater,
            (Segment::Alpha(_), Segment::Number(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A parsed version identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    text: String,
    segments: Vec<Segment>,
}

impl Version {
    /// Parse a version string
    ///
    /// Examples:
    /// - "0.8.13" → [0, 8, 13]
    /// - "1.1.1w" → [1, 1, 1, "w"]
    /// - "3.0.0-rc1" → [3, 0, 0, "rc", 1]
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidVersion {
            version: s.to_string(),
            reason: reason.to_string(),
        };

        if s.is_empty() {
            return Err(invalid("version is empty"));
        }
        if !s.starts_with(|c: char| c.is_ascii_alphanumeric())
            || !s.ends_with(|c: char| c.is_ascii_alphanumeric())
        {
            return Err(invalid("must start and end with a letter or digit"));
        }

        let mut segments = Vec::new();
        for part in s.split(['.', '-', '_']) {
            if part.is_empty() {
                return Err(invalid("empty segment"));
            }
            if let Some(bad) = part.chars().find(|c| !c.is_ascii_alphanumeric()) {
                return Err(invalid(&format!("unexpected character '{}'", bad)));
            }
            split_runs(part, &mut segments).map_err(|e| invalid(&e))?;
        }

        Ok(Self {
            text: s.to_string(),
            segments,
        })
    }

    /// The version exactly as written
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Check whether a string is a valid version identifier
    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_ok()
    }
}

/// Split a separator-free chunk like "13rc2" into digit and letter runs
fn split_runs(part: &str, out: &mut Vec<Segment>) -> std::result::Result<(), String> {
    let mut rest = part;
    while let Some(first) = rest.chars().next() {
        let numeric = first.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != numeric)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);
        if numeric {
            let n = run
                .parse::<u64>()
                .map_err(|e| format!("segment '{}' out of range: {}", run, e))?;
            out.push(Segment::Number(n));
        } else {
            out.push(Segment::Alpha(run.to_string()));
        }
        rest = tail;
    }
    Ok(())
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        // "1.0" and "1_0" differ under Eq, so they must not compare Equal
        self.segments
            .cmp(&other.segments)
            .then_with(|| self.text.cmp(&other.text))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
