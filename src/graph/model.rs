// src/graph/model.rs

use std::collections::{HashMap, HashSet};
use std::fmt;

/// Stable identity of a task in the graph.
///
/// The wrapped index follows project-registration order, then
/// task-declaration order within a project. The scheduler relies on this for
/// deterministic tie-breaking, so indices must never be reassigned after
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub(crate) usize);

impl TaskId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One task in the graph: identity, bound command, and adjacency.
#[derive(Debug, Clone)]
pub struct TaskNode {
    pub project: String,
    pub name: String,
    pub cmd: String,
    pub(crate) predecessors: Vec<TaskId>,
    pub(crate) successors: Vec<TaskId>,
}

impl TaskNode {
    /// `project:task` form used in logs, reports and error messages.
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.project, self.name)
    }
}

impl fmt::Display for TaskNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.project, self.name)
    }
}

/// Immutable task graph spanning all projects.
///
/// Topology never changes after [`builder::build_task_graph`] returns; the
/// scheduler only reads structure and keeps its own per-task execution state.
///
/// [`builder::build_task_graph`]: crate::graph::builder::build_task_graph
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    nodes: Vec<TaskNode>,
    lookup: HashMap<(String, String), TaskId>,
    edge_set: HashSet<(TaskId, TaskId)>,
}

impl TaskGraph {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All task ids in stable declaration order.
    pub fn ids(&self) -> impl Iterator<Item = TaskId> + use<> {
        (0..self.nodes.len()).map(TaskId)
    }

    pub fn node(&self, id: TaskId) -> &TaskNode {
        &self.nodes[id.0]
    }

    /// Lookup a task by `(project, task name)`.
    pub fn task_id(&self, project: &str, task: &str) -> Option<TaskId> {
        self.lookup
            .get(&(project.to_string(), task.to_string()))
            .copied()
    }

    /// Direct predecessors: tasks that must succeed before `id` may start.
    pub fn predecessors(&self, id: TaskId) -> &[TaskId] {
        &self.nodes[id.0].predecessors
    }

    /// Direct successors: tasks that list `id` among their predecessors.
    pub fn successors(&self, id: TaskId) -> &[TaskId] {
        &self.nodes[id.0].successors
    }

    pub(crate) fn push_node(&mut self, node: TaskNode) -> TaskId {
        let id = TaskId(self.nodes.len());
        self.lookup
            .insert((node.project.clone(), node.name.clone()), id);
        self.nodes.push(node);
        id
    }

    /// Insert the edge `pred -> succ`, ignoring duplicates.
    pub(crate) fn add_edge(&mut self, pred: TaskId, succ: TaskId) {
        if self.edge_set.insert((pred, succ)) {
            self.nodes[succ.0].predecessors.push(pred);
            self.nodes[pred.0].successors.push(succ);
        }
    }

    /// Whether the graph contains the edge `pred -> succ`.
    pub fn has_edge(&self, pred: TaskId, succ: TaskId) -> bool {
        self.edge_set.contains(&(pred, succ))
    }
}
