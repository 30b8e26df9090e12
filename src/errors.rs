// src/errors.rs

//! Crate-wide error types and aliases.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Duplicate project: '{0}' is declared more than once")]
    DuplicateProject(String),

    #[error(
        "Unknown dependency: project '{project}' depends on '{dependency}', \
         which is not declared earlier in the build description"
    )]
    UnknownDependency { project: String, dependency: String },

    #[error(
        "Conflicting dependency kinds: project '{project}' declares '{dependency}' \
         as both {first} and {second}"
    )]
    ConflictingDependencyKind {
        project: String,
        dependency: String,
        first: String,
        second: String,
    },

    #[error("Unknown task: '{task}' referenced in `after` of project '{project}'")]
    UnknownTask { project: String, task: String },

    #[error("Cycle detected in task graph: {}", cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BuildagError {
    /// Process exit code for construction-time failures.
    ///
    /// Task failures at execution time are reported through the execution
    /// report (exit code 1), not through this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildagError::CyclicDependency { .. } => 2,
            _ => 3,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, BuildagError>;
