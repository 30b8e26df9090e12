// src/sched/mod.rs

//! Deterministic task scheduling.
//!
//! - [`scheduler`] contains the pure per-run state machine: in-degree
//!   bookkeeping, the ready set with its declaration-order tie-break, and
//!   failure/skip propagation. It has no Tokio types and performs no IO.
//! - [`report`] holds the execution report accumulated across a run.

pub mod report;
pub mod scheduler;

pub use report::{ExecutionReport, Outcome, TaskReport};
pub use scheduler::{ExecutionState, ScheduledTask, Scheduler, SchedulerOptions};
