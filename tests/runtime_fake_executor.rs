// tests/runtime_fake_executor.rs

//! End-to-end runtime behaviour with a fake executor: ordering, report
//! coverage, failure propagation, fail-fast, and shutdown.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

use buildag::config::BuildFile;
use buildag::engine::{Runtime, RuntimeEvent, RuntimeOptions};
use buildag::graph::build_task_graph;
use buildag::registry::ProjectRegistry;
use buildag::sched::{ExecutionReport, Outcome, Scheduler, SchedulerOptions};
use buildag::types::DependencyKind;

use buildag_test_utils::builders::{BuildFileBuilder, ProjectConfigBuilder, TaskConfigBuilder};
use buildag_test_utils::fake_executor::FakeExecutor;
use buildag_test_utils::init_tracing;

/// Run a build with the fake executor; returns the report and the dispatch
/// order of qualified task names.
async fn run_build(
    build: &BuildFile,
    workers: usize,
    failing: &[&str],
) -> (ExecutionReport, Vec<String>) {
    let registry = ProjectRegistry::from_config(build).unwrap();
    let graph = Arc::new(build_task_graph(&registry, build).unwrap());
    let scheduler = Scheduler::new(
        graph,
        SchedulerOptions {
            fail_fast: build.settings.fail_fast,
        },
    )
    .unwrap();

    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);
    let started = Arc::new(Mutex::new(Vec::new()));
    let executor =
        FakeExecutor::new(rt_tx.clone(), started.clone()).with_failing(failing.iter().copied());

    let runtime = Runtime::new(scheduler, RuntimeOptions { workers }, rt_rx, executor);
    let report = timeout(Duration::from_secs(3), runtime.run())
        .await
        .expect("runtime did not finish within 3 seconds")
        .unwrap();

    let order = started.lock().unwrap().clone();
    (report, order)
}

fn outcome_of<'r>(report: &'r ExecutionReport, name: &str) -> &'r Outcome {
    &report
        .entries()
        .iter()
        .find(|e| format!("{}:{}", e.project, e.task) == name)
        .unwrap_or_else(|| panic!("task {name} missing from report"))
        .outcome
}

/// Two-module build: an annotation processor (compile -> jar) consumed as a
/// compile-time dependency by a core library (compile -> instrument -> jar).
fn figura_build() -> BuildFile {
    BuildFileBuilder::new()
        .with_project(
            ProjectConfigBuilder::new("comptime")
                .task(TaskConfigBuilder::new("compile", "echo c").build())
                .task(TaskConfigBuilder::new("jar", "echo j").after("compile").build())
                .build(),
        )
        .with_project(
            ProjectConfigBuilder::new("core")
                .depends_on("comptime", DependencyKind::CompileTime)
                .task(TaskConfigBuilder::new("compile", "echo c").build())
                .task(
                    TaskConfigBuilder::new("instrument", "echo i")
                        .after("compile")
                        .build(),
                )
                .task(TaskConfigBuilder::new("jar", "echo j").after("instrument").build())
                .build(),
        )
        .build()
}

/// Chain a -> b -> c in one project, plus an unrelated project with one task.
fn chain_with_independent_build() -> BuildFileBuilder {
    BuildFileBuilder::new()
        .with_project(
            ProjectConfigBuilder::new("core")
                .task(TaskConfigBuilder::new("a", "echo a").build())
                .task(TaskConfigBuilder::new("b", "echo b").after("a").build())
                .task(TaskConfigBuilder::new("c", "echo c").after("b").build())
                .build(),
        )
        .with_project(
            ProjectConfigBuilder::new("other")
                .task(TaskConfigBuilder::new("d", "echo d").build())
                .build(),
        )
}

#[tokio::test]
async fn compile_time_dependency_orders_whole_projects() {
    init_tracing();

    let (report, order) = run_build(&figura_build(), 1, &[]).await;

    assert_eq!(
        order,
        vec![
            "comptime:compile",
            "comptime:jar",
            "core:compile",
            "core:instrument",
            "core:jar",
        ]
    );
    assert!(report.all_succeeded());
    assert_eq!(report.exit_code(), 0);
}

#[tokio::test]
async fn single_worker_runs_are_deterministic() {
    init_tracing();

    let (first_report, first_order) = run_build(&figura_build(), 1, &[]).await;
    let (second_report, second_order) = run_build(&figura_build(), 1, &[]).await;

    assert_eq!(first_order, second_order);
    let names = |r: &ExecutionReport| {
        r.entries()
            .iter()
            .map(|e| format!("{}:{}", e.project, e.task))
            .collect::<Vec<_>>()
    };
    assert_eq!(names(&first_report), names(&second_report));
}

#[tokio::test]
async fn every_task_appears_exactly_once_in_report() {
    init_tracing();

    // Diamond: root -> left/right -> join.
    let build = BuildFileBuilder::new()
        .with_project(
            ProjectConfigBuilder::new("core")
                .task(TaskConfigBuilder::new("root", "echo r").build())
                .task(TaskConfigBuilder::new("left", "echo l").after("root").build())
                .task(TaskConfigBuilder::new("right", "echo r").after("root").build())
                .task(
                    TaskConfigBuilder::new("join", "echo j")
                        .after("left")
                        .after("right")
                        .build(),
                )
                .build(),
        )
        .build();

    let (report, _) = run_build(&build, 2, &[]).await;

    let mut names: Vec<String> = report
        .entries()
        .iter()
        .map(|e| format!("{}:{}", e.project, e.task))
        .collect();
    assert_eq!(names.len(), 4);
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 4, "report contains duplicate entries");
}

#[tokio::test]
async fn failure_skips_dependents_but_not_independent_branches() {
    init_tracing();

    let build = chain_with_independent_build().build();
    let (report, order) = run_build(&build, 1, &["core:b"]).await;

    assert_eq!(order, vec!["core:a", "core:b", "other:d"]);

    assert_eq!(outcome_of(&report, "core:a"), &Outcome::Succeeded);
    assert!(matches!(outcome_of(&report, "core:b"), Outcome::Failed(_)));
    assert_eq!(outcome_of(&report, "core:c"), &Outcome::Skipped);
    assert_eq!(outcome_of(&report, "other:d"), &Outcome::Succeeded);

    assert_eq!(report.len(), 4);
    assert_eq!(report.exit_code(), 1);
}

#[tokio::test]
async fn fail_fast_skips_independent_branches_too() {
    init_tracing();

    let build = chain_with_independent_build().with_fail_fast(true).build();
    let (report, order) = run_build(&build, 1, &["core:b"]).await;

    assert_eq!(order, vec!["core:a", "core:b"]);
    assert!(matches!(outcome_of(&report, "core:b"), Outcome::Failed(_)));
    assert_eq!(outcome_of(&report, "core:c"), &Outcome::Skipped);
    assert_eq!(outcome_of(&report, "other:d"), &Outcome::Skipped);
}

#[tokio::test]
async fn dependency_order_holds_with_multiple_workers() {
    init_tracing();

    let (report, order) = run_build(&figura_build(), 4, &[]).await;

    assert!(report.all_succeeded());
    let pos =
        |name: &str| order.iter().position(|n| n == name).expect("task was dispatched");
    assert!(pos("comptime:compile") < pos("comptime:jar"));
    assert!(pos("comptime:jar") < pos("core:compile"));
    assert!(pos("core:compile") < pos("core:instrument"));
    assert!(pos("core:instrument") < pos("core:jar"));
}

#[tokio::test]
async fn shutdown_skips_unstarted_tasks_and_still_reports() {
    init_tracing();

    let build = BuildFileBuilder::new()
        .with_project(
            ProjectConfigBuilder::new("core")
                .task(TaskConfigBuilder::new("a", "echo a").build())
                .task(TaskConfigBuilder::new("b", "echo b").after("a").build())
                .task(TaskConfigBuilder::new("c", "echo c").after("b").build())
                .build(),
        )
        .build();

    let registry = ProjectRegistry::from_config(&build).unwrap();
    let graph = Arc::new(build_task_graph(&registry, &build).unwrap());
    let scheduler = Scheduler::new(graph, SchedulerOptions::default()).unwrap();

    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);
    let started = Arc::new(Mutex::new(Vec::new()));
    let executor = FakeExecutor::new(rt_tx.clone(), started.clone());

    // Shutdown is already queued when the runtime starts; the first task has
    // been dispatched by then, everything else must be skipped.
    rt_tx.send(RuntimeEvent::ShutdownRequested).await.unwrap();

    let runtime = Runtime::new(scheduler, RuntimeOptions { workers: 1 }, rt_rx, executor);
    let report = timeout(Duration::from_secs(3), runtime.run())
        .await
        .expect("runtime did not finish within 3 seconds")
        .unwrap();

    assert_eq!(outcome_of(&report, "core:a"), &Outcome::Succeeded);
    assert_eq!(outcome_of(&report, "core:b"), &Outcome::Skipped);
    assert_eq!(outcome_of(&report, "core:c"), &Outcome::Skipped);
    assert_eq!(report.len(), 3);
}
