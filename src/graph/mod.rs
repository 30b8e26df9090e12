// src/graph/mod.rs

//! Task graph construction.
//!
//! - [`model`] holds the immutable task graph: nodes in a stable declaration
//!   order plus deduplicated predecessor/successor edges.
//! - [`builder`] instantiates tasks per project, wires explicit `after` edges
//!   and the derived edges inferred from compile-time project dependencies.
//! - [`cycle`] names one complete cycle when the combined graph has one.

pub mod builder;
pub mod cycle;
pub mod model;

pub use builder::build_task_graph;
pub use cycle::ensure_acyclic;
pub use model::{TaskGraph, TaskId, TaskNode};
