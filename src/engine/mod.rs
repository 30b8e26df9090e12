// src/engine/mod.rs

//! Execution engine for buildag.
//!
//! The scheduling semantics live in the pure [`crate::sched`] state machine;
//! this module is the async shell around it:
//! - [`RuntimeEvent`]s flow in over a single mpsc channel (worker
//!   completions, Ctrl-C), which is the one synchronization point for all
//!   scheduler state transitions.
//! - [`runtime::Runtime`] dispatches ready tasks to an executor backend,
//!   bounded by the worker limit, and collects the execution report.

use crate::graph::TaskId;
use crate::types::TaskOutcome;

/// Runtime options used by the async shell.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    /// Maximum number of tasks running concurrently. Must be >= 1.
    pub workers: usize,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self { workers: 1 }
    }
}

/// Events flowing into the runtime from the executor or external signals.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// A task's action finished with a concrete outcome.
    TaskCompleted { task: TaskId, outcome: TaskOutcome },
    /// Graceful shutdown requested (e.g. Ctrl-C). In-flight tasks finish;
    /// everything not yet started is skipped.
    ShutdownRequested,
}

pub mod runtime;

pub use runtime::Runtime;
