// src/config/model.rs

use serde::Deserialize;

use crate::types::DependencyKind;

/// Top-level build description as read from a TOML file.
///
/// ```toml
/// [settings]
/// workers = 2
/// fail_fast = false
///
/// [[project]]
/// name = "comptime"
///
/// [[project.task]]
/// name = "compile"
/// cmd = "echo compiling comptime"
///
/// [[project]]
/// name = "core"
/// dependencies = [{ project = "comptime", kind = "compile-time" }]
///
/// [[project.task]]
/// name = "compile"
/// cmd = "echo compiling core"
/// ```
///
/// Projects are kept as an ordered list: declaration order *is* registration
/// order, and dependencies may only point at earlier projects.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildFile {
    /// Global behaviour from `[settings]`.
    #[serde(default)]
    pub settings: SettingsSection,

    /// All projects from `[[project]]`, in declaration order.
    #[serde(default, rename = "project")]
    pub projects: Vec<ProjectConfig>,
}

/// `[settings]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsSection {
    /// Maximum number of tasks executed concurrently.
    ///
    /// With the default of 1, the task start order is fully deterministic.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Stop dispatching new tasks after the first failure.
    #[serde(default)]
    pub fail_fast: bool,
}

fn default_workers() -> usize {
    1
}

impl Default for SettingsSection {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            fail_fast: false,
        }
    }
}

/// One `[[project]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Unique project name.
    pub name: String,

    /// Dependencies on other projects, in declaration order.
    ///
    /// Each must reference a project declared *earlier* in the file.
    #[serde(default)]
    pub dependencies: Vec<DependencyConfig>,

    /// Tasks of this project from `[[project.task]]`, in declaration order.
    ///
    /// A project with no tasks is legal; it models an external library that
    /// only participates in dependency kinds, not in scheduling.
    #[serde(default, rename = "task")]
    pub tasks: Vec<TaskConfig>,
}

/// One entry of a project's `dependencies` list.
#[derive(Debug, Clone, Deserialize)]
pub struct DependencyConfig {
    /// Name of the dependency project.
    pub project: String,

    /// Dependency kind; defaults to `runtime` when omitted.
    #[serde(default = "default_kind")]
    pub kind: DependencyKind,
}

fn default_kind() -> DependencyKind {
    DependencyKind::Runtime
}

/// One `[[project.task]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    /// Task name, unique within its project.
    pub name: String,

    /// The command bound to this task.
    pub cmd: String,

    /// Explicit predecessors: names of tasks of the *same* project that must
    /// succeed before this one starts.
    #[serde(default)]
    pub after: Vec<String>,
}
