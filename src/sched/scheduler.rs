// src/sched/scheduler.rs

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::graph::{ensure_acyclic, TaskGraph, TaskId};
use crate::sched::report::{ExecutionReport, Outcome, TaskReport};
use crate::types::TaskOutcome;

/// Per-task execution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    /// Waiting on at least one predecessor.
    Pending,
    /// All predecessors succeeded; in the ready set, not yet dispatched.
    Ready,
    /// Dispatched to the executor.
    Running,
    Succeeded,
    Failed,
    /// Never attempted: blocked by a failed/skipped predecessor, or dispatch
    /// stopped (fail-fast, shutdown).
    Skipped,
}

impl ExecutionState {
    fn is_terminal(self) -> bool {
        matches!(
            self,
            ExecutionState::Succeeded | ExecutionState::Failed | ExecutionState::Skipped
        )
    }
}

/// Description of a task handed to the executor.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    pub id: TaskId,
    pub project: String,
    pub name: String,
    pub cmd: String,
}

impl ScheduledTask {
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.project, self.name)
    }
}

/// Options that influence scheduling behaviour.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedulerOptions {
    /// Stop dispatching new tasks after the first failure; tasks already
    /// running finish normally, everything not yet started is skipped.
    pub fail_fast: bool,
}

/// Pure scheduling state machine over an immutable [`TaskGraph`].
///
/// The graph is shared read-only; this struct owns all per-run mutable state
/// (execution states, in-degree counters, the ready set, and the report).
/// All transitions happen on the caller's single control path, so no internal
/// locking is needed even when task execution itself is parallel.
///
/// Tie-breaking: the ready set is a min-heap over [`TaskId`], whose index
/// order equals declaration order. With `take_ready(1)` called until
/// exhaustion, repeated runs over the same graph dispatch in the same order.
#[derive(Debug)]
pub struct Scheduler {
    graph: Arc<TaskGraph>,
    states: Vec<ExecutionState>,
    indegree: Vec<usize>,
    ready: BinaryHeap<Reverse<TaskId>>,
    /// Tasks in the order they were dispatched.
    start_order: Vec<TaskId>,
    /// Tasks in the order they were marked skipped.
    skip_order: Vec<TaskId>,
    outcomes: Vec<Option<Outcome>>,
    terminal_count: usize,
    failure_seen: bool,
    options: SchedulerOptions,
}

impl Scheduler {
    /// Build a scheduler over the given graph.
    ///
    /// Fails with [`CyclicDependency`] before any task executes if the graph
    /// contains a cycle.
    ///
    /// [`CyclicDependency`]: crate::errors::BuildagError::CyclicDependency
    pub fn new(graph: Arc<TaskGraph>, options: SchedulerOptions) -> Result<Self> {
        ensure_acyclic(&graph)?;

        let n = graph.len();
        let indegree: Vec<usize> = (0..n).map(|i| graph.predecessors(TaskId(i)).len()).collect();
        let mut states = vec![ExecutionState::Pending; n];
        let mut ready = BinaryHeap::new();

        for id in graph.ids() {
            if indegree[id.index()] == 0 {
                states[id.index()] = ExecutionState::Ready;
                ready.push(Reverse(id));
            }
        }

        debug!(tasks = n, roots = ready.len(), "scheduler constructed");

        Ok(Self {
            graph,
            states,
            indegree,
            ready,
            start_order: Vec::new(),
            skip_order: Vec::new(),
            outcomes: vec![None; n],
            terminal_count: 0,
            failure_seen: false,
            options,
        })
    }

    /// Whether every task has reached a terminal state.
    pub fn is_complete(&self) -> bool {
        self.terminal_count == self.graph.len()
    }

    pub fn state_of(&self, id: TaskId) -> ExecutionState {
        self.states[id.index()]
    }

    /// Pop up to `limit` ready tasks in declaration order, marking them
    /// Running and recording their start order.
    ///
    /// Returns an empty vector once a failure was seen in fail-fast mode.
    pub fn take_ready(&mut self, limit: usize) -> Vec<ScheduledTask> {
        if self.options.fail_fast && self.failure_seen {
            return Vec::new();
        }

        let mut batch = Vec::new();
        while batch.len() < limit {
            let Some(Reverse(id)) = self.ready.pop() else {
                break;
            };
            // Entries skipped after being enqueued (fail-fast, shutdown) are
            // stale; drop them.
            if self.states[id.index()] != ExecutionState::Ready {
                continue;
            }

            self.states[id.index()] = ExecutionState::Running;
            self.start_order.push(id);

            let node = self.graph.node(id);
            debug!(task = %node, "dispatching task");
            batch.push(ScheduledTask {
                id,
                project: node.project.clone(),
                name: node.name.clone(),
                cmd: node.cmd.clone(),
            });
        }
        batch
    }

    /// Apply a completion outcome reported by the executor.
    ///
    /// On success, successors whose predecessors have now all succeeded move
    /// into the ready set. On failure, all transitive successors are skipped;
    /// with fail-fast set, every not-yet-started task is skipped as well.
    pub fn record_completion(&mut self, id: TaskId, outcome: TaskOutcome) {
        if self.states[id.index()] != ExecutionState::Running {
            warn!(
                task = %self.graph.node(id),
                state = ?self.states[id.index()],
                "completion for task that is not running; ignoring"
            );
            return;
        }

        match outcome {
            TaskOutcome::Success => {
                self.mark_terminal(id, ExecutionState::Succeeded, Outcome::Succeeded);
                debug!(task = %self.graph.node(id), "task succeeded");

                // clone to avoid borrowing issues while mutating counters
                let successors: Vec<TaskId> = self.graph.successors(id).to_vec();
                for succ in successors {
                    self.indegree[succ.index()] -= 1;
                    if self.indegree[succ.index()] == 0
                        && self.states[succ.index()] == ExecutionState::Pending
                    {
                        self.states[succ.index()] = ExecutionState::Ready;
                        self.ready.push(Reverse(succ));
                    }
                }
            }
            TaskOutcome::Failed(cause) => {
                warn!(
                    task = %self.graph.node(id),
                    cause = %cause,
                    "task failed; skipping dependents"
                );
                self.mark_terminal(id, ExecutionState::Failed, Outcome::Failed(cause));
                self.failure_seen = true;
                self.skip_transitive_successors(id);

                if self.options.fail_fast {
                    info!("fail-fast: skipping all not-yet-started tasks");
                    self.skip_unstarted();
                }
            }
        }
    }

    /// Skip every task that has not started yet (used for fail-fast and for
    /// shutdown). Running tasks are left to finish.
    pub fn skip_unstarted(&mut self) {
        for id in self.graph.ids() {
            self.skip_if_unstarted(id);
        }
    }

    /// Consume the scheduler, yielding the final report: started tasks in
    /// start order, then skipped tasks in skip order.
    pub fn into_report(self) -> ExecutionReport {
        let mut report = ExecutionReport::default();
        for &id in self.start_order.iter().chain(self.skip_order.iter()) {
            let node = self.graph.node(id);
            let outcome = self.outcomes[id.index()]
                .clone()
                .unwrap_or(Outcome::Skipped);
            report.push(TaskReport {
                project: node.project.clone(),
                task: node.name.clone(),
                outcome,
            });
        }
        report
    }

    fn mark_terminal(&mut self, id: TaskId, state: ExecutionState, outcome: Outcome) {
        debug_assert!(state.is_terminal());
        self.states[id.index()] = state;
        self.outcomes[id.index()] = Some(outcome);
        self.terminal_count += 1;
    }

    fn skip_if_unstarted(&mut self, id: TaskId) {
        if matches!(
            self.states[id.index()],
            ExecutionState::Pending | ExecutionState::Ready
        ) {
            self.mark_terminal(id, ExecutionState::Skipped, Outcome::Skipped);
            self.skip_order.push(id);
            debug!(task = %self.graph.node(id), "task skipped");
        }
    }

    /// Mark all transitive successors of a failed/skipped task as Skipped so
    /// the report can distinguish "blocked by failure" from "never attempted".
    fn skip_transitive_successors(&mut self, root: TaskId) {
        let mut stack: Vec<TaskId> = self.graph.successors(root).to_vec();

        while let Some(id) = stack.pop() {
            if matches!(
                self.states[id.index()],
                ExecutionState::Pending | ExecutionState::Ready
            ) {
                self.skip_if_unstarted(id);
                stack.extend_from_slice(self.graph.successors(id));
            }
        }
    }
}
