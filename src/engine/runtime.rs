// src/engine/runtime.rs

use std::fmt;

use anyhow::anyhow;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::exec::ExecutorBackend;
use crate::sched::{ExecutionReport, Scheduler};

use super::{RuntimeEvent, RuntimeOptions};

/// Drives the scheduler in response to `RuntimeEvent`s and delegates task
/// execution to an [`ExecutorBackend`].
///
/// All scheduler mutations happen inside `run`'s single loop: workers report
/// completions through the event channel, so in-degree decrements and ready
/// set updates are never applied concurrently.
pub struct Runtime<E: ExecutorBackend> {
    scheduler: Scheduler,
    options: RuntimeOptions,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    executor: E,
    in_flight: usize,
}

impl<E: ExecutorBackend> fmt::Debug for Runtime<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("scheduler", &self.scheduler)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl<E: ExecutorBackend> Runtime<E> {
    pub fn new(
        scheduler: Scheduler,
        options: RuntimeOptions,
        event_rx: mpsc::Receiver<RuntimeEvent>,
        executor: E,
    ) -> Self {
        Self {
            scheduler,
            options,
            event_rx,
            executor,
            in_flight: 0,
        }
    }

    /// Drive execution to completion and return the report.
    ///
    /// The loop blocks only while the ready set is empty and workers are
    /// outstanding; each completion is applied to the scheduler and may
    /// release new ready tasks for dispatch.
    pub async fn run(mut self) -> Result<ExecutionReport> {
        info!(workers = self.options.workers, "buildag runtime started");

        self.dispatch_ready().await?;

        while !self.scheduler.is_complete() {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    return Err(
                        anyhow!("runtime event channel closed before the run completed").into(),
                    );
                }
            };

            debug!(?event, "runtime received event");

            match event {
                RuntimeEvent::TaskCompleted { task, outcome } => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    self.scheduler.record_completion(task, outcome);
                    self.dispatch_ready().await?;
                }
                RuntimeEvent::ShutdownRequested => {
                    warn!("shutdown requested; skipping all not-yet-started tasks");
                    self.scheduler.skip_unstarted();
                }
            }
        }

        info!("buildag runtime finished");
        Ok(self.scheduler.into_report())
    }

    /// Hand ready tasks to the executor, up to the free worker capacity.
    async fn dispatch_ready(&mut self) -> Result<()> {
        let capacity = self.options.workers.saturating_sub(self.in_flight);
        if capacity == 0 {
            return Ok(());
        }

        let batch = self.scheduler.take_ready(capacity);
        if batch.is_empty() {
            return Ok(());
        }

        self.in_flight += batch.len();

        let names: Vec<String> = batch.iter().map(|t| t.qualified_name()).collect();
        debug!(?names, in_flight = self.in_flight, "dispatching ready tasks");

        self.executor.spawn_ready_tasks(batch).await
    }
}
