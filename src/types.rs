use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Kind of a project-to-project dependency.
///
/// - `Runtime`: only affects packaging/classpath of consumers; adds no
///   ordering edge to the task graph.
/// - `CompileTime`: the dependency's output (e.g. an annotation processor)
///   must be built before the consumer compiles, so a derived ordering edge
///   is added.
/// - `ApiExported`: treated as `Runtime` for ordering, but propagates
///   transitively into the effective runtime dependencies of consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyKind {
    Runtime,
    CompileTime,
    ApiExported,
}

impl DependencyKind {
    /// Whether this kind introduces a derived compile-order edge.
    pub fn orders_compilation(self) -> bool {
        matches!(self, DependencyKind::CompileTime)
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DependencyKind::Runtime => "runtime",
            DependencyKind::CompileTime => "compile-time",
            DependencyKind::ApiExported => "api-exported",
        };
        f.write_str(s)
    }
}

impl FromStr for DependencyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "runtime" => Ok(DependencyKind::Runtime),
            "compile-time" => Ok(DependencyKind::CompileTime),
            "api-exported" => Ok(DependencyKind::ApiExported),
            other => Err(format!(
                "invalid dependency kind: {other} (expected \"runtime\", \"compile-time\" or \"api-exported\")"
            )),
        }
    }
}

/// Cause attached to a failed task for the execution report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    /// Exit code of the task's process, if it exited at all.
    pub exit_code: Option<i32>,
    /// Human-readable cause (spawn error, nonzero exit, ...).
    pub message: String,
}

impl TaskFailure {
    pub fn from_exit_code(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            message: format!("command exited with code {code}"),
        }
    }

    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            exit_code: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of invoking a task's action.
///
/// Ordinary action failure is always converted into `Failed`; the executor
/// never aborts the whole run for a single bad task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Failed(TaskFailure),
}
