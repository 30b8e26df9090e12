// src/exec/mod.rs

//! Task execution layer.
//!
//! The runtime talks to an [`ExecutorBackend`] rather than spawning
//! processes itself, so tests can substitute a fake executor.
//!
//! - [`backend`] defines the backend trait and the production
//!   implementation.
//! - [`task_runner`] runs one task command as an OS process and converts
//!   its result into a `TaskCompleted` event.

pub mod backend;
pub mod task_runner;

pub use backend::{ExecutorBackend, ProcessExecutorBackend};
