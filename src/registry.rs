// src/registry.rs

//! Project registry: the set of projects and their declared dependencies.
//!
//! Projects must be registered in dependency order; a dependency may only
//! reference a project that is already present. This makes forward references
//! (and therefore project-level cycles) unrepresentable once registration
//! succeeds.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::config::model::BuildFile;
use crate::errors::{BuildagError, Result};
use crate::types::DependencyKind;

/// A registered project with its declared dependencies, in declaration order.
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub dependencies: Vec<(String, DependencyKind)>,
}

/// Registry of projects, iterated in registration order.
#[derive(Debug, Clone, Default)]
pub struct ProjectRegistry {
    projects: Vec<Project>,
    index: HashMap<String, usize>,
}

impl ProjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a validated [`BuildFile`], registering projects
    /// in declaration order.
    pub fn from_config(build: &BuildFile) -> Result<Self> {
        let mut registry = Self::new();
        for project in &build.projects {
            let deps: Vec<(String, DependencyKind)> = project
                .dependencies
                .iter()
                .map(|d| (d.project.clone(), d.kind))
                .collect();
            registry.add_project(&project.name, &deps)?;
        }
        Ok(registry)
    }

    /// Register a project with its dependency declarations.
    ///
    /// Fails with:
    /// - [`BuildagError::DuplicateProject`] if the name is taken,
    /// - [`BuildagError::UnknownDependency`] if a dependency is not yet
    ///   registered (forward references are rejected),
    /// - [`BuildagError::ConflictingDependencyKind`] if the same dependency
    ///   is declared twice with different kinds.
    pub fn add_project(&mut self, name: &str, deps: &[(String, DependencyKind)]) -> Result<()> {
        if self.index.contains_key(name) {
            return Err(BuildagError::DuplicateProject(name.to_string()));
        }

        let mut seen_kinds: HashMap<&str, DependencyKind> = HashMap::new();
        for (dep_name, kind) in deps {
            if !self.index.contains_key(dep_name.as_str()) {
                return Err(BuildagError::UnknownDependency {
                    project: name.to_string(),
                    dependency: dep_name.clone(),
                });
            }
            if let Some(prev) = seen_kinds.insert(dep_name.as_str(), *kind) {
                if prev != *kind {
                    return Err(BuildagError::ConflictingDependencyKind {
                        project: name.to_string(),
                        dependency: dep_name.clone(),
                        first: prev.to_string(),
                        second: kind.to_string(),
                    });
                }
            }
        }

        debug!(project = %name, deps = deps.len(), "registering project");

        self.index.insert(name.to_string(), self.projects.len());
        self.projects.push(Project {
            name: name.to_string(),
            dependencies: deps.to_vec(),
        });
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Projects in registration order.
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Project> {
        self.index.get(name).map(|&i| &self.projects[i])
    }

    /// Declared kind of the edge `project -> dependency`, if any.
    pub fn resolve_dependency_kind(&self, project: &str, dependency: &str) -> Option<DependencyKind> {
        self.get(project)?
            .dependencies
            .iter()
            .find(|(dep, _)| dep == dependency)
            .map(|(_, kind)| *kind)
    }

    /// Effective runtime dependencies of a project: direct runtime and
    /// api-exported dependencies, plus everything reached transitively
    /// through api-exported edges.
    ///
    /// Compile-time dependencies are excluded; they never land on a
    /// consumer's runtime classpath.
    pub fn runtime_closure(&self, project: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();

        if let Some(p) = self.get(project) {
            for (dep, kind) in &p.dependencies {
                if !kind.orders_compilation() {
                    queue.push_back(dep.as_str());
                }
            }
        }

        while let Some(name) = queue.pop_front() {
            if !seen.insert(name) {
                continue;
            }
            out.push(name.to_string());

            // Only api-exported declarations propagate further.
            if let Some(p) = self.get(name) {
                for (dep, kind) in &p.dependencies {
                    if matches!(kind, DependencyKind::ApiExported) {
                        queue.push_back(dep.as_str());
                    }
                }
            }
        }

        out
    }
}
