// src/exec/backend.rs

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;
use tracing::debug;

use crate::engine::RuntimeEvent;
use crate::errors::Result;
use crate::sched::ScheduledTask;

use super::task_runner::run_task;

/// Trait abstracting how dispatched tasks are executed.
///
/// Production code uses [`ProcessExecutorBackend`]; tests can provide their
/// own implementation that records dispatches and synthesizes
/// `TaskCompleted` events without spawning real processes.
pub trait ExecutorBackend: Send {
    /// Start executing the given tasks.
    ///
    /// Implementations must eventually send one
    /// [`RuntimeEvent::TaskCompleted`] per task back to the runtime,
    /// converting any ordinary action failure into a `Failed` outcome rather
    /// than an error.
    fn spawn_ready_tasks(
        &mut self,
        tasks: Vec<ScheduledTask>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Production backend: each task runs as an OS process in its own Tokio
/// task, so dispatched tasks execute in parallel up to the runtime's worker
/// bound.
pub struct ProcessExecutorBackend {
    runtime_tx: mpsc::Sender<RuntimeEvent>,
}

impl ProcessExecutorBackend {
    pub fn new(runtime_tx: mpsc::Sender<RuntimeEvent>) -> Self {
        Self { runtime_tx }
    }
}

impl ExecutorBackend for ProcessExecutorBackend {
    fn spawn_ready_tasks(
        &mut self,
        tasks: Vec<ScheduledTask>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let tx = self.runtime_tx.clone();

        Box::pin(async move {
            for task in tasks {
                debug!(task = %task.qualified_name(), "spawning task process");
                let tx = tx.clone();
                tokio::spawn(async move {
                    run_task(task, tx).await;
                });
            }
            Ok(())
        })
    }
}
