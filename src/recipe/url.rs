// src/recipe/url.rs

//! Deriving concrete archive URLs from a recipe's URL template

use crate::error::{Error, Result};
use crate::recipe::format::Recipe;
use std::path::Path;
use tracing::debug;

const VERSION_PLACEHOLDER: &str = "%(version)s";

/// Expand the recipe's URL template for one version
///
/// Templates normally carry `%(version)s`. A template copied verbatim from
/// an upstream download page (`.../libelf-0.8.13.tar.gz`) is accepted too
/// when it literally contains one of the recipe's known versions: the last
/// occurrence of that version text is swapped for the requested one. The
/// longest matching version wins, so `1.2.13` is preferred over `1.2.1`.
pub fn url_for_version(recipe: &Recipe, version: &str) -> Result<String> {
    let template = recipe.url_template();

    if template.contains(VERSION_PLACEHOLDER) {
        return Ok(recipe.substitute(template, version, Path::new("")));
    }

    let embedded = embedded_version(recipe).ok_or_else(|| {
        Error::ParseError(format!(
            "URL for {} has no {} placeholder and names no known version: {}",
            recipe.name(),
            VERSION_PLACEHOLDER,
            template
        ))
    })?;

    debug!(
        "Deriving {} URL for {} from literal version {}",
        recipe.name(),
        version,
        embedded
    );

    // Checked by embedded_version
    let at = template.rfind(embedded).unwrap_or_default();
    let mut url = String::with_capacity(template.len() + version.len());
    url.push_str(&template[..at]);
    url.push_str(version);
    url.push_str(&template[at + embedded.len()..]);

    Ok(recipe.substitute(&url, version, Path::new("")))
}

/// Whether the template can produce a URL for every version
pub fn has_version_slot(recipe: &Recipe) -> bool {
    recipe.url_template().contains(VERSION_PLACEHOLDER) || embedded_version(recipe).is_some()
}

fn embedded_version(recipe: &Recipe) -> Option<&str> {
    let template = recipe.url_template();
    recipe
        .versions
        .keys()
        .map(String::as_str)
        .filter(|v| template.contains(*v))
        .max_by_key(|v| v.len())
}
