// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use cookbook::{Kitchen, KitchenConfig, RecipeRegistry};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const LIBELF_CONFIGURE_ARGS: [&str; 4] = [
    "--prefix=/opt/libelf/0.8.13",
    "--enable-shared",
    "--disable-dependency-tracking",
    "--disable-debug",
];

/// Kitchen over the built-in recipes that never touches the filesystem.
pub fn dry_kitchen() -> Kitchen {
    Kitchen::new(KitchenConfig::dry_run(), RecipeRegistry::builtin().unwrap())
}

/// Kitchen installing under a fresh temporary root.
///
/// Returns (TempDir, Kitchen) - keep the TempDir alive to prevent cleanup.
pub fn scratch_kitchen(make: &str) -> (TempDir, Kitchen) {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = KitchenConfig::with_install_root(&temp_dir.path().join("root"))
        .jobs(8)
        .make_program(make);
    let kitchen = Kitchen::new(config, RecipeRegistry::builtin().unwrap());
    (temp_dir, kitchen)
}

/// Write a fake source tree whose configure script records its arguments
/// one per line in `configure.args`.
pub fn fake_source_tree(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join("configure"),
        "#!/bin/sh\nprintf '%s\\n' \"$@\" > configure.args\n",
    )
    .unwrap();
}
