// src/recipe/parser.rs

//! Recipe file parsing

use crate::error::{Error, Result};
use crate::hash::Checksum;
use crate::recipe::format::Recipe;
use crate::recipe::url::has_version_slot;
use crate::version::Version;
use std::path::Path;

/// Parse a recipe from a TOML string
pub fn parse_recipe(content: &str) -> Result<Recipe> {
    toml::from_str(content).map_err(|e| Error::ParseError(format!("Invalid recipe: {}", e)))
}

/// Parse a recipe from a file
pub fn parse_recipe_file(path: &Path) -> Result<Recipe> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::IoError(format!("Failed to read recipe file {}: {}", path.display(), e)))?;

    parse_recipe(&content)
}

/// Parse and validate a recipe, returning it with any warnings
pub fn load_recipe(content: &str) -> Result<(Recipe, Vec<String>)> {
    let recipe = parse_recipe(content)?;
    let warnings = validate_recipe(&recipe)?;
    Ok((recipe, warnings))
}

/// Validate a recipe for completeness and correctness
///
/// Hard errors are data-integrity problems the fetcher or the install
/// procedure would trip over later; soft problems come back as warnings.
pub fn validate_recipe(recipe: &Recipe) -> Result<Vec<String>> {
    let mut warnings = Vec::new();
    let name = recipe.name();

    if name.is_empty() {
        return Err(Error::ParseError("Recipe package name cannot be empty".to_string()));
    }
    if name.chars().any(|c| c.is_whitespace() || c == '@' || c == '/') {
        return Err(Error::ParseError(format!(
            "Recipe package name '{}' may not contain whitespace, '@' or '/'",
            name
        )));
    }
    if recipe.url_template().is_empty() {
        return Err(Error::ParseError(format!("Recipe {} has no url", name)));
    }

    if recipe.versions.is_empty() {
        return Err(Error::ParseError(format!("Recipe {} lists no versions", name)));
    }

    for (version, checksum) in &recipe.versions {
        Version::parse(version)?;
        Checksum::parse(checksum).map_err(|e| Error::InvalidChecksum {
            package: name.to_string(),
            version: version.clone(),
            reason: e.to_string(),
        })?;
    }

    if !has_version_slot(recipe) {
        return Err(Error::ParseError(format!(
            "URL for {} contains neither %(version)s nor a known version: {}",
            name,
            recipe.url_template()
        )));
    }

    if let Some(serial) = &recipe.build.serial_install
        && serial.reason.trim().is_empty()
    {
        return Err(Error::ParseError(format!(
            "Recipe {} declares serial_install without a reason",
            name
        )));
    }

    if recipe.homepage().is_none() {
        warnings.push("Missing package homepage".to_string());
    }
    if recipe.package.license.is_none() {
        warnings.push("Missing package license".to_string());
    }
    if !recipe.build.configure.is_empty()
        && !recipe.build.configure.iter().any(|a| a.contains("%(prefix)s"))
    {
        warnings.push("Configure arguments never reference %(prefix)s".to_string());
    }

    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_recipe() {
        let content = r#"
[package]
name = "test"
url = "https://example.com/test-%(version)s.tar.gz"

[versions]
"1.0" = "d41d8cd98f00b204e9800998ecf8427e"
"#;

        let recipe = parse_recipe(content).unwrap();
        assert_eq!(recipe.name(), "test");
    }

    #[test]
    fn test_parse_invalid_recipe() {
        let content = "this is not valid toml at all {}";
        assert!(parse_recipe(content).is_err());
    }

    #[test]
    fn test_duplicate_version_key_rejected() {
        let content = r#"
[package]
name = "test"
url = "https://example.com/test-%(version)s.tar.gz"

[versions]
"1.0" = "d41d8cd98f00b204e9800998ecf8427e"
"1.0" = "9b8aa094c4e5765dabf4da391f00d15c"
"#;
        assert!(parse_recipe(content).is_err());
    }

    #[test]
    fn test_validate_empty_name() {
        let content = r#"
[package]
name = ""
url = "https://example.com/test-%(version)s.tar.gz"

[versions]
"1.0" = "d41d8cd98f00b204e9800998ecf8427e"
"#;

        let recipe = parse_recipe(content).unwrap();
        assert!(validate_recipe(&recipe).is_err());
    }

    #[test]
    fn test_validate_bad_checksum() {
        let content = r#"
[package]
name = "test"
url = "https://example.com/test-%(version)s.tar.gz"

[versions]
"1.0" = "not-a-digest"
"#;

        let recipe = parse_recipe(content).unwrap();
        let err = validate_recipe(&recipe).unwrap_err();
        assert!(matches!(err, Error::InvalidChecksum { ref version, .. } if version == "1.0"));
    }

    #[test]
    fn test_validate_bad_version_key() {
        let content = r#"
[package]
name = "test"
url = "https://example.com/test-%(version)s.tar.gz"

[versions]
"1..0" = "d41d8cd98f00b204e9800998ecf8427e"
"#;

        let recipe = parse_recipe(content).unwrap();
        assert!(matches!(
            validate_recipe(&recipe),
            Err(Error::InvalidVersion { .. })
        ));
    }

    #[test]
    fn test_validate_url_without_version() {
        let content = r#"
[package]
name = "test"
url = "https://example.com/test-latest.tar.gz"

[versions]
"1.0" = "d41d8cd98f00b204e9800998ecf8427e"
"#;

        let recipe = parse_recipe(content).unwrap();
        assert!(validate_recipe(&recipe).is_err());
    }

    #[test]
    fn test_validate_serial_install_needs_reason() {
        let content = r#"
[package]
name = "test"
url = "https://example.com/test-%(version)s.tar.gz"

[versions]
"1.0" = "d41d8cd98f00b204e9800998ecf8427e"

[build.serial_install]
reason = "  "
"#;

        let recipe = parse_recipe(content).unwrap();
        assert!(validate_recipe(&recipe).is_err());
    }

    #[test]
    fn test_validate_warnings() {
        let content = r#"
[package]
name = "test"
url = "https://example.com/test-%(version)s.tar.gz"

[versions]
"1.0" = "d41d8cd98f00b204e9800998ecf8427e"

[build]
configure = ["--enable-shared"]
"#;

        let (_, warnings) = load_recipe(content).unwrap();
        assert!(warnings.iter().any(|w| w.contains("homepage")));
        assert!(warnings.iter().any(|w| w.contains("license")));
        assert!(warnings.iter().any(|w| w.contains("%(prefix)s")));
    }
}
