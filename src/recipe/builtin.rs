// src/recipe/builtin.rs

//! Recipes compiled into the crate

use crate::error::{Error, Result};
use crate::recipe::format::Recipe;
use crate::recipe::parser::parse_recipe;
use crate::recipe::registry::RecipeRegistry;

/// libelf 0.8.x, built with autotools
///
/// Its `make install` creates directories with racing `mkdir` calls, so the
/// recipe carries a `serial_install` exception.
pub const LIBELF: &str = include_str!("../../recipes/libelf.toml");

const BUILTINS: &[(&str, &str)] = &[("libelf", LIBELF)];

/// Parse one built-in recipe by name
pub fn builtin_recipe(name: &str) -> Result<Recipe> {
    let (_, source) = BUILTINS
        .iter()
        .find(|(n, _)| *n == name)
        .ok_or_else(|| Error::NotFound(format!("No built-in recipe '{}'", name)))?;
    parse_recipe(source)
}

/// Register every built-in recipe
pub fn register_builtins(registry: &mut RecipeRegistry) -> Result<()> {
    for (name, _) in BUILTINS {
        registry.register(builtin_recipe(name)?)?;
    }
    Ok(())
}
