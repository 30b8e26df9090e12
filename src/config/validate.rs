// src/config/validate.rs

use std::collections::HashSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::BuildFile;
use crate::errors::{BuildagError, Result};

/// Run basic semantic validation against a loaded build description.
///
/// This checks:
/// - there is at least one project
/// - `workers >= 1`
/// - task names are unique within each project
/// - the project-level dependency relation has no cycles
///
/// It does **not** check dependency references (registration order, duplicate
/// projects, conflicting kinds) or `after` references; those are detected
/// when the registry and the task graph are built.
pub fn validate_config(build: &BuildFile) -> Result<()> {
    ensure_has_projects(build)?;
    validate_settings(build)?;
    validate_task_names(build)?;
    validate_project_dag(build)?;
    Ok(())
}

fn ensure_has_projects(build: &BuildFile) -> Result<()> {
    if build.projects.is_empty() {
        return Err(BuildagError::ConfigError(
            "build description must contain at least one [[project]]".to_string(),
        ));
    }
    Ok(())
}

fn validate_settings(build: &BuildFile) -> Result<()> {
    if build.settings.workers == 0 {
        return Err(BuildagError::ConfigError(
            "[settings].workers must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_task_names(build: &BuildFile) -> Result<()> {
    for project in &build.projects {
        let mut seen: HashSet<&str> = HashSet::new();
        for task in &project.tasks {
            if !seen.insert(task.name.as_str()) {
                return Err(BuildagError::ConfigError(format!(
                    "project '{}' declares task '{}' more than once",
                    project.name, task.name
                )));
            }
        }
    }
    Ok(())
}

fn validate_project_dag(build: &BuildFile) -> Result<()> {
    // Registration order already rules out forward references, so a cycle
    // cannot normally survive registry construction. Still check the declared
    // relation directly so a bad description fails with the right error even
    // before the registry sees it.
    //
    // Edge direction: dependency -> project.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for project in &build.projects {
        graph.add_node(project.name.as_str());
    }

    for project in &build.projects {
        for dep in &project.dependencies {
            if dep.project == project.name {
                return Err(BuildagError::ConfigError(format!(
                    "project '{}' cannot depend on itself",
                    project.name
                )));
            }
            graph.add_edge(dep.project.as_str(), project.name.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(BuildagError::CyclicDependency {
            cycle: vec![cycle.node_id().to_string()],
        }),
    }
}
