// src/recipe/registry.rs

//! Recipe registry: package name to record and install procedure

use crate::error::{Error, Result};
use crate::recipe::format::Recipe;
use crate::recipe::kitchen::{InstallProcedure, procedure_for};
use crate::recipe::parser::{parse_recipe_file, validate_recipe};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A registered recipe paired with the procedure that installs it
#[derive(Clone)]
pub struct RecipeEntry {
    recipe: Arc<Recipe>,
    procedure: Arc<dyn InstallProcedure>,
}

impl RecipeEntry {
    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn procedure(&self) -> &dyn InstallProcedure {
        self.procedure.as_ref()
    }
}

impl std::fmt::Debug for RecipeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeEntry")
            .field("name", &self.recipe.name())
            .field("procedure", &self.procedure.name())
            .finish()
    }
}

/// All recipes known to a kitchen, keyed by package name
///
/// Entries are immutable once registered. A failed registration leaves the
/// registry untouched.
#[derive(Debug, Default, Clone)]
pub struct RecipeRegistry {
    entries: BTreeMap<String, RecipeEntry>,
}

impl RecipeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the recipes shipped with the crate
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        super::builtin::register_builtins(&mut registry)?;
        Ok(registry)
    }

    /// Register a recipe with an explicit procedure
    ///
    /// The recipe is validated first; warnings are logged, errors returned.
    pub fn register_with(
        &mut self,
        recipe: Recipe,
        procedure: Arc<dyn InstallProcedure>,
    ) -> Result<()> {
        let name = recipe.name().to_string();
        if self.entries.contains_key(&name) {
            return Err(Error::AlreadyRegistered(name));
        }

        for warning in validate_recipe(&recipe)? {
            warn!("{}: {}", name, warning);
        }

        debug!("Registered {} ({} procedure)", name, procedure.name());
        self.entries.insert(
            name,
            RecipeEntry {
                recipe: Arc::new(recipe),
                procedure,
            },
        );
        Ok(())
    }

    /// Register a recipe using the procedure its build system selects
    pub fn register(&mut self, recipe: Recipe) -> Result<()> {
        let procedure = procedure_for(recipe.build.system);
        self.register_with(recipe, procedure)
    }

    /// Load every `*.toml` recipe in a directory
    ///
    /// Files are loaded in name order so that a duplicate is always
    /// reported against the same file. Either every file is registered or,
    /// on the first failure, none is. Returns the number registered.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let mut paths: Vec<_> = fs::read_dir(dir)
            .map_err(|e| {
                Error::IoError(format!("Failed to read recipe directory {}: {}", dir.display(), e))
            })?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        paths.sort();

        let mut staged = self.clone();
        for path in &paths {
            let recipe = parse_recipe_file(path)?;
            staged.register(recipe).map_err(|e| match e {
                Error::ParseError(msg) => {
                    Error::ParseError(format!("{}: {}", path.display(), msg))
                }
                other => other,
            })?;
        }

        *self = staged;
        info!("Loaded {} recipe(s) from {}", paths.len(), dir.display());
        Ok(paths.len())
    }

    /// Look a recipe up by package name
    pub fn get(&self, name: &str) -> Option<&RecipeEntry> {
        self.entries.get(name)
    }

    /// Look a recipe up, failing if it is not registered
    pub fn lookup(&self, name: &str) -> Result<&RecipeEntry> {
        self.get(name)
            .ok_or_else(|| Error::NotFound(format!("No recipe for package '{}'", name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered package names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecipeEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::kitchen::MakefileProcedure;
    use crate::recipe::parser::parse_recipe;

    const HELLO: &str = r#"
[package]
name = "hello"
homepage = "https://www.gnu.org/software/hello/"
url = "https://ftp.gnu.org/gnu/hello/hello-%(version)s.tar.gz"
license = "GPL-3.0-or-later"

[versions]
"2.12.1" = "5a3d9b1e6a1e5a5fb1dfbb5c2f9bcbd0"
"#;

    #[test]
    fn test_builtin_has_libelf() {
        let registry = RecipeRegistry::builtin().unwrap();
        assert!(registry.contains("libelf"));
        assert_eq!(registry.lookup("libelf").unwrap().procedure().name(), "autotools");
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = RecipeRegistry::new();
        registry.register(parse_recipe(HELLO).unwrap()).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["hello"]);
        assert_eq!(registry.get("hello").unwrap().recipe().name(), "hello");
        assert!(matches!(registry.lookup("nope"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = RecipeRegistry::new();
        registry.register(parse_recipe(HELLO).unwrap()).unwrap();

        let err = registry
            .register_with(parse_recipe(HELLO).unwrap(), Arc::new(MakefileProcedure))
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyRegistered(ref n) if n == "hello"));
        // The original entry is untouched
        assert_eq!(registry.get("hello").unwrap().procedure().name(), "autotools");
    }

    #[test]
    fn test_invalid_recipe_not_registered() {
        let mut registry = RecipeRegistry::new();
        let bad = parse_recipe(&HELLO.replace("5a3d9b1e6a1e5a5fb1dfbb5c2f9bcbd0", "oops")).unwrap();
        assert!(registry.register(bad).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_dir() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("hello.toml"), HELLO).unwrap();
        fs::write(temp.path().join("README"), "not a recipe").unwrap();

        let mut registry = RecipeRegistry::builtin().unwrap();
        let loaded = registry.load_dir(temp.path()).unwrap();
        assert_eq!(loaded, 1);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["hello", "libelf"]);
    }

    #[test]
    fn test_load_dir_is_all_or_nothing() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("a-hello.toml"), HELLO).unwrap();
        fs::write(
            temp.path().join("b-broken.toml"),
            HELLO
                .replace("name = \"hello\"", "name = \"broken\"")
                .replace("5a3d9b1e6a1e5a5fb1dfbb5c2f9bcbd0", "oops"),
        )
        .unwrap();

        let mut registry = RecipeRegistry::builtin().unwrap();
        assert!(registry.load_dir(temp.path()).is_err());
        // hello.toml sorts first and was valid, but is not kept
        assert!(!registry.contains("hello"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["libelf"]);
    }

    #[test]
    fn test_load_dir_reports_file() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(
            temp.path().join("broken.toml"),
            HELLO.replace("hello-%(version)s", "hello-latest"),
        )
        .unwrap();

        let mut registry = RecipeRegistry::new();
        let err = registry.load_dir(temp.path()).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }
}
