use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use buildag::engine::RuntimeEvent;
use buildag::errors::Result;
use buildag::exec::ExecutorBackend;
use buildag::sched::ScheduledTask;
use buildag::types::{TaskFailure, TaskOutcome};

/// A fake executor that:
/// - records the qualified names of tasks in the order they were dispatched
/// - immediately reports `TaskCompleted` for each one, failing any task
///   whose qualified name is in the configured failing set.
pub struct FakeExecutor {
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    started: Arc<Mutex<Vec<String>>>,
    failing: HashSet<String>,
}

impl FakeExecutor {
    pub fn new(runtime_tx: mpsc::Sender<RuntimeEvent>, started: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            runtime_tx,
            started,
            failing: HashSet::new(),
        }
    }

    /// Make tasks with the given qualified names (`project:task`) fail.
    pub fn with_failing<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.failing = names.into_iter().map(Into::into).collect();
        self
    }
}

impl ExecutorBackend for FakeExecutor {
    fn spawn_ready_tasks(
        &mut self,
        tasks: Vec<ScheduledTask>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let tx = self.runtime_tx.clone();
        let started = Arc::clone(&self.started);
        let failing = self.failing.clone();

        Box::pin(async move {
            for t in tasks {
                let name = t.qualified_name();
                {
                    let mut guard = started.lock().unwrap();
                    guard.push(name.clone());
                }

                let outcome = if failing.contains(&name) {
                    TaskOutcome::Failed(TaskFailure::from_exit_code(1))
                } else {
                    TaskOutcome::Success
                };

                tx.send(RuntimeEvent::TaskCompleted {
                    task: t.id,
                    outcome,
                })
                .await
                .map_err(anyhow::Error::from)?;
            }
            Ok(())
        })
    }
}
