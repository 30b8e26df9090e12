#![allow(dead_code)]

use buildag::config::{BuildFile, DependencyConfig, ProjectConfig, SettingsSection, TaskConfig};
use buildag::types::DependencyKind;

/// Builder for `BuildFile` to simplify test setup.
pub struct BuildFileBuilder {
    build: BuildFile,
}

impl BuildFileBuilder {
    pub fn new() -> Self {
        Self {
            build: BuildFile {
                settings: SettingsSection::default(),
                projects: Vec::new(),
            },
        }
    }

    pub fn with_project(mut self, project: ProjectConfig) -> Self {
        self.build.projects.push(project);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.build.settings.workers = workers;
        self
    }

    pub fn with_fail_fast(mut self, val: bool) -> Self {
        self.build.settings.fail_fast = val;
        self
    }

    pub fn build(self) -> BuildFile {
        self.build
    }
}

impl Default for BuildFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `ProjectConfig`.
pub struct ProjectConfigBuilder {
    project: ProjectConfig,
}

impl ProjectConfigBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            project: ProjectConfig {
                name: name.to_string(),
                dependencies: Vec::new(),
                tasks: Vec::new(),
            },
        }
    }

    pub fn depends_on(mut self, project: &str, kind: DependencyKind) -> Self {
        self.project.dependencies.push(DependencyConfig {
            project: project.to_string(),
            kind,
        });
        self
    }

    pub fn task(mut self, task: TaskConfig) -> Self {
        self.project.tasks.push(task);
        self
    }

    pub fn build(self) -> ProjectConfig {
        self.project
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new(name: &str, cmd: &str) -> Self {
        Self {
            task: TaskConfig {
                name: name.to_string(),
                cmd: cmd.to_string(),
                after: vec![],
            },
        }
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.after.push(dep.to_string());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}
