// src/sched/report.rs

//! Execution report: every task exactly once, with its final outcome.

use std::fmt;

use crate::types::TaskFailure;

/// Final outcome of one task as recorded in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed(TaskFailure),
    /// Never attempted because a predecessor failed or was skipped, or
    /// because dispatch stopped (fail-fast, shutdown).
    Skipped,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Succeeded => f.write_str("succeeded"),
            Outcome::Failed(cause) => write!(f, "failed ({cause})"),
            Outcome::Skipped => f.write_str("skipped"),
        }
    }
}

/// One line of the execution report.
#[derive(Debug, Clone)]
pub struct TaskReport {
    pub project: String,
    pub task: String,
    pub outcome: Outcome,
}

/// Ordered execution report for one run.
///
/// Entries for started tasks appear in the order they were *started* (not
/// finished); entries for skipped tasks follow in the order they were marked.
/// Every task of the graph appears exactly once.
#[derive(Debug, Clone, Default)]
pub struct ExecutionReport {
    entries: Vec<TaskReport>,
}

impl ExecutionReport {
    pub(crate) fn push(&mut self, entry: TaskReport) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TaskReport] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn all_succeeded(&self) -> bool {
        self.entries
            .iter()
            .all(|e| matches!(e.outcome, Outcome::Succeeded))
    }

    /// Exit code convention for a driving process: 0 when everything
    /// succeeded, 1 otherwise. Construction-time errors never reach a report
    /// and carry their own codes (see `BuildagError::exit_code`).
    pub fn exit_code(&self) -> i32 {
        if self.all_succeeded() { 0 } else { 1 }
    }
}

impl fmt::Display for ExecutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}:{}  {}", entry.project, entry.task, entry.outcome)?;
        }
        Ok(())
    }
}
