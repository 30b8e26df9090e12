// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod graph;
pub mod logging;
pub mod registry;
pub mod sched;
pub mod types;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::BuildFile;
use crate::engine::{Runtime, RuntimeEvent, RuntimeOptions};
use crate::errors::Result;
use crate::exec::ProcessExecutorBackend;
use crate::graph::{build_task_graph, TaskGraph};
use crate::registry::ProjectRegistry;
use crate::sched::{ExecutionReport, Scheduler, SchedulerOptions};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - build description loading + validation
/// - project registry and task graph construction
/// - scheduler (cycle check happens here, before anything executes)
/// - process executor
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<ExecutionReport> {
    let config_path = PathBuf::from(&args.config);
    let build = load_and_validate(&config_path)?;

    let registry = ProjectRegistry::from_config(&build)?;
    let graph = Arc::new(build_task_graph(&registry, &build)?);

    if args.dry_run {
        print_dry_run(&build, &registry, &graph);
        return Ok(ExecutionReport::default());
    }

    let sched_options = SchedulerOptions {
        fail_fast: args.fail_fast || build.settings.fail_fast,
    };
    let scheduler = Scheduler::new(Arc::clone(&graph), sched_options)?;

    let options = RuntimeOptions {
        workers: args.workers.unwrap_or(build.settings.workers).max(1),
    };

    // Runtime event channel: the single synchronization point for worker
    // completions and shutdown.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let executor = ProcessExecutorBackend::new(rt_tx.clone());

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    let runtime = Runtime::new(scheduler, options, rt_rx, executor);
    let report = runtime.run().await?;

    print!("{report}");
    if report.all_succeeded() {
        info!(tasks = report.len(), "build finished successfully");
    } else {
        info!(tasks = report.len(), "build finished with failures");
    }

    Ok(report)
}

/// Dry-run output: projects, dependency kinds, effective runtime closures,
/// and the task graph with its explicit and derived predecessor edges.
fn print_dry_run(build: &BuildFile, registry: &ProjectRegistry, graph: &TaskGraph) {
    println!("buildag dry-run");
    println!("  settings.workers = {}", build.settings.workers);
    println!("  settings.fail_fast = {}", build.settings.fail_fast);
    println!();

    println!("projects ({}):", build.projects.len());
    for project in registry.projects() {
        println!("  - {}", project.name);
        for (dep, kind) in &project.dependencies {
            println!("      depends on {dep} ({kind})");
        }
        let closure = registry.runtime_closure(&project.name);
        if !closure.is_empty() {
            println!("      runtime closure: {closure:?}");
        }
    }
    println!();

    println!("tasks ({}):", graph.len());
    for id in graph.ids() {
        let node = graph.node(id);
        println!("  - {node}");
        println!("      cmd: {}", node.cmd);
        for &pred in graph.predecessors(id) {
            println!("      after: {}", graph.node(pred));
        }
    }

    debug!("dry-run complete (no execution)");
}
