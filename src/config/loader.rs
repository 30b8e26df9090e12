// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::model::BuildFile;
use crate::config::validate::validate_config;
use crate::errors::Result;

/// Load a build description from a given path and return the raw `BuildFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (dependency references, cycles, etc.). Use
/// [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<BuildFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading build description at {:?}", path))?;

    let build: BuildFile = toml::from_str(&contents)?;

    Ok(build)
}

/// Load a build description from path and run basic validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for empty project lists, duplicate task names, bad settings,
///   and project-level dependency cycles.
///
/// Registry construction and graph building perform the remaining checks
/// (duplicate projects, forward references, unknown `after` tasks).
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<BuildFile> {
    let build = load_from_path(&path)?;
    validate_config(&build)?;
    Ok(build)
}

/// Helper to resolve a default build description path.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Buildag.toml")
}
