// src/graph/cycle.rs

//! Pre-execution cycle check for the combined task graph.

use std::collections::{HashMap, VecDeque};

use crate::errors::{BuildagError, Result};
use crate::graph::model::{TaskGraph, TaskId};

/// Verify the task graph is acyclic; on failure, name one complete cycle.
///
/// Uses Kahn peeling: repeatedly remove in-degree-zero tasks. Anything left
/// over sits on (or downstream inside) a cycle, and every leftover task has
/// at least one leftover predecessor, so walking predecessors from any
/// leftover node must revisit a node and closes the cycle.
pub fn ensure_acyclic(graph: &TaskGraph) -> Result<()> {
    let n = graph.len();
    let mut indeg: Vec<usize> = (0..n)
        .map(|i| graph.predecessors(TaskId(i)).len())
        .collect();

    let mut queue: VecDeque<TaskId> = graph.ids().filter(|&id| indeg[id.index()] == 0).collect();
    let mut removed = vec![false; n];
    let mut removed_count = 0usize;

    while let Some(id) = queue.pop_front() {
        removed[id.index()] = true;
        removed_count += 1;
        for &succ in graph.successors(id) {
            indeg[succ.index()] -= 1;
            if indeg[succ.index()] == 0 {
                queue.push_back(succ);
            }
        }
    }

    if removed_count == n {
        return Ok(());
    }

    let cycle = reconstruct_cycle(graph, &removed);
    Err(BuildagError::CyclicDependency { cycle })
}

/// Walk predecessors among the leftover tasks until one repeats, then emit
/// the loop in forward (dependency) order, closing it by repeating the first
/// participant.
fn reconstruct_cycle(graph: &TaskGraph, removed: &[bool]) -> Vec<String> {
    let start = graph
        .ids()
        .find(|&id| !removed[id.index()])
        .expect("at least one task remains when a cycle exists");

    let mut path: Vec<TaskId> = vec![start];
    let mut position: HashMap<TaskId, usize> = HashMap::from([(start, 0)]);

    loop {
        let current = *path.last().expect("path is never empty");
        let Some(&pred) = graph
            .predecessors(current)
            .iter()
            .find(|p| !removed[p.index()])
        else {
            // Cannot happen for leftover nodes of a Kahn peel; bail with
            // what we have rather than looping forever.
            return path.iter().map(|&id| graph.node(id).qualified_name()).collect();
        };

        if let Some(&i) = position.get(&pred) {
            // path[i..] walked backwards along edges; reverse for display.
            let mut names: Vec<String> = path[i..]
                .iter()
                .rev()
                .map(|&id| graph.node(id).qualified_name())
                .collect();
            let first = names[0].clone();
            names.push(first);
            return names;
        }

        position.insert(pred, path.len());
        path.push(pred);
    }
}
