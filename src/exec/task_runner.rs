// src/exec/task_runner.rs

//! Individual task process runner.

use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::engine::RuntimeEvent;
use crate::sched::ScheduledTask;
use crate::types::{TaskFailure, TaskOutcome};

/// Run a single task command and emit a `TaskCompleted` event.
///
/// Ordinary failure (spawn error, nonzero exit) becomes a `Failed` outcome
/// with the captured cause; it never propagates as an error. Only a broken
/// event channel ends the surrounding run.
pub async fn run_task(task: ScheduledTask, runtime_tx: mpsc::Sender<RuntimeEvent>) {
    let outcome = match run_task_inner(&task).await {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(task = %task.qualified_name(), error = %err, "task execution error");
            TaskOutcome::Failed(TaskFailure::from_message(format!("{err:#}")))
        }
    };

    let _ = runtime_tx
        .send(RuntimeEvent::TaskCompleted {
            task: task.id,
            outcome,
        })
        .await;
}

async fn run_task_inner(task: &ScheduledTask) -> Result<TaskOutcome> {
    info!(task = %task.qualified_name(), cmd = %task.cmd, "starting task process");

    // Shell command appropriate for the platform.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(&task.cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(&task.cmd);
        c
    };

    cmd.stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning process for task '{}'", task.qualified_name()))?;

    // Stream both pipes into the log so buffers don't fill.
    if let Some(stdout) = child.stdout.take() {
        let name = task.qualified_name();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                info!(task = %name, "stdout: {}", line);
            }
        });
    }
    if let Some(stderr) = child.stderr.take() {
        let name = task.qualified_name();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(task = %name, "stderr: {}", line);
            }
        });
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for process of task '{}'", task.qualified_name()))?;

    let code = status.code().unwrap_or(-1);
    info!(
        task = %task.qualified_name(),
        exit_code = code,
        success = status.success(),
        "task process exited"
    );

    if status.success() {
        Ok(TaskOutcome::Success)
    } else {
        Ok(TaskOutcome::Failed(TaskFailure::from_exit_code(code)))
    }
}
