// src/config/mod.rs

//! Build description loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a build description from disk (`loader.rs`).
//! - Validate basic invariants before graph construction (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{BuildFile, DependencyConfig, ProjectConfig, SettingsSection, TaskConfig};
pub use validate::validate_config;
