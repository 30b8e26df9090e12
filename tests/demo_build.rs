// tests/demo_build.rs

//! The demo build description in `demos/` stays loadable and produces the
//! expected cross-project ordering.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

use buildag::config::load_and_validate;
use buildag::engine::{Runtime, RuntimeEvent, RuntimeOptions};
use buildag::graph::build_task_graph;
use buildag::registry::ProjectRegistry;
use buildag::sched::{Scheduler, SchedulerOptions};
use buildag::types::DependencyKind;

use buildag_test_utils::fake_executor::FakeExecutor;
use buildag_test_utils::init_tracing;

fn demo_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/figura-build.toml")
}

#[test]
fn demo_description_validates_and_resolves_kinds() {
    init_tracing();

    let build = load_and_validate(demo_path()).unwrap();
    let registry = ProjectRegistry::from_config(&build).unwrap();

    assert_eq!(
        registry.resolve_dependency_kind("figura-core", "figura-comptime"),
        Some(DependencyKind::CompileTime)
    );
    assert_eq!(
        registry.resolve_dependency_kind("figura-core", "gson"),
        Some(DependencyKind::Runtime)
    );

    // The api-exported molang dependency stays in the runtime closure.
    let closure = registry.runtime_closure("figura-core");
    assert!(closure.contains(&"figura-molang".to_string()));
    assert!(!closure.contains(&"figura-comptime".to_string()));
}

#[tokio::test]
async fn demo_build_runs_processor_before_core() {
    init_tracing();

    let build = load_and_validate(demo_path()).unwrap();
    let registry = ProjectRegistry::from_config(&build).unwrap();
    let graph = Arc::new(build_task_graph(&registry, &build).unwrap());
    let scheduler = Scheduler::new(graph, SchedulerOptions::default()).unwrap();

    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);
    let started = Arc::new(Mutex::new(Vec::new()));
    let executor = FakeExecutor::new(rt_tx.clone(), started.clone());

    let runtime = Runtime::new(scheduler, RuntimeOptions { workers: 1 }, rt_rx, executor);
    let report = timeout(Duration::from_secs(3), runtime.run())
        .await
        .expect("runtime did not finish within 3 seconds")
        .unwrap();

    assert!(report.all_succeeded());

    let order = started.lock().unwrap().clone();
    assert_eq!(
        order,
        vec![
            "figura-comptime:compile",
            "figura-comptime:jar",
            "figura-core:compile",
            "figura-core:instrument",
            "figura-core:jar",
            "figura-core:publish",
        ]
    );
}
