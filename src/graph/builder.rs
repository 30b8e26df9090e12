// src/graph/builder.rs

use std::collections::HashMap;

use tracing::debug;

use crate::config::model::BuildFile;
use crate::errors::{BuildagError, Result};
use crate::graph::model::{TaskGraph, TaskId, TaskNode};
use crate::registry::ProjectRegistry;

/// Construct the full task graph from the registry and the per-project task
/// declarations.
///
/// Nodes are created in registration order, then task-declaration order, so
/// `TaskId` indices give the scheduler its deterministic tie-break.
///
/// Edges:
/// - explicit: each task's `after` list, resolved within the same project
///   (fails with [`BuildagError::UnknownTask`] on a bad reference);
/// - derived: for every compile-time dependency `A -> B`, the terminal task
///   of `B` must succeed before each entry task of `A` starts.
///
/// Duplicate edges are collapsed, so a derived edge that restates an explicit
/// one is harmless.
pub fn build_task_graph(registry: &ProjectRegistry, build: &BuildFile) -> Result<TaskGraph> {
    let templates: HashMap<&str, &crate::config::model::ProjectConfig> = build
        .projects
        .iter()
        .map(|p| (p.name.as_str(), p))
        .collect();

    let mut graph = TaskGraph::default();

    // First pass: instantiate every task as a node.
    for project in registry.projects() {
        let Some(cfg) = templates.get(project.name.as_str()) else {
            continue;
        };
        for task in &cfg.tasks {
            graph.push_node(TaskNode {
                project: project.name.clone(),
                name: task.name.clone(),
                cmd: task.cmd.clone(),
                predecessors: Vec::new(),
                successors: Vec::new(),
            });
        }
    }

    // Second pass: explicit `after` edges within each project.
    for project in registry.projects() {
        let Some(cfg) = templates.get(project.name.as_str()) else {
            continue;
        };
        for task in &cfg.tasks {
            let succ = graph
                .task_id(&project.name, &task.name)
                .expect("task inserted in first pass");
            for pred_name in &task.after {
                let pred = graph.task_id(&project.name, pred_name).ok_or_else(|| {
                    BuildagError::UnknownTask {
                        project: project.name.clone(),
                        task: pred_name.clone(),
                    }
                })?;
                graph.add_edge(pred, succ);
            }
        }
    }

    // Third pass: derived edges from compile-time project dependencies.
    for project in registry.projects() {
        for (dep_name, kind) in &project.dependencies {
            if !kind.orders_compilation() {
                continue;
            }
            let Some(terminal) = terminal_task(&graph, &templates, dep_name) else {
                // Dependency declares no tasks (external library); nothing
                // to order against.
                continue;
            };
            for entry in entry_tasks(&graph, &templates, &project.name) {
                debug!(
                    pred = %graph.node(terminal),
                    succ = %graph.node(entry),
                    "adding derived compile-order edge"
                );
                graph.add_edge(terminal, entry);
            }
        }
    }

    Ok(graph)
}

/// Terminal task of a project: the declaration-last task that no other task
/// of the same project lists in its `after`. This is the task whose output a
/// compile-time consumer needs (e.g. `jar` in compile -> jar).
fn terminal_task(
    graph: &TaskGraph,
    templates: &HashMap<&str, &crate::config::model::ProjectConfig>,
    project: &str,
) -> Option<TaskId> {
    let cfg = templates.get(project)?;

    let mut terminal = None;
    for task in &cfg.tasks {
        let is_predecessor = cfg
            .tasks
            .iter()
            .any(|other| other.after.iter().any(|a| a == &task.name));
        if !is_predecessor {
            terminal = graph.task_id(project, &task.name);
        }
    }
    terminal
}

/// Entry tasks of a project: tasks with no same-project predecessors, i.e.
/// where compilation of the project starts.
fn entry_tasks(
    graph: &TaskGraph,
    templates: &HashMap<&str, &crate::config::model::ProjectConfig>,
    project: &str,
) -> Vec<TaskId> {
    let Some(cfg) = templates.get(project) else {
        return Vec::new();
    };

    cfg.tasks
        .iter()
        .filter(|task| task.after.is_empty())
        .filter_map(|task| graph.task_id(project, &task.name))
        .collect()
}
