//! Container lifecycle tests

use std::sync::Arc;

use trellis_domain::Error;
use trellis_infrastructure::config::MemoryConfigSource;
use trellis_infrastructure::di::{Container, LifecycleState};

use crate::test_utils::explicit::{Clock, Failing, Greeter, Orphan, Stamp};
use crate::test_utils::shop::Repository;
use crate::test_utils::{RecordingServer, CYCLIC_ROOT, SHOP_ROOT};

#[test]
fn test_start_runs_to_running() {
    let server = RecordingServer::new();
    let mut container = Container::new()
        .with_module_roots([SHOP_ROOT])
        .append(server.clone());
    assert_eq!(container.state(), LifecycleState::Unstarted);

    let graph = container.start().unwrap();

    assert_eq!(container.state(), LifecycleState::Running);
    assert_eq!(graph.len(), 3);
    assert_eq!(container.routes().len(), 3);
    assert_eq!(server.endpoints().len(), 3);
    assert!(Arc::ptr_eq(&container.graph().unwrap(), &graph));
}

#[test]
fn test_start_twice_is_a_lifecycle_error() {
    let mut container = Container::new().with_module_roots([SHOP_ROOT]);
    container.start().unwrap();

    assert!(matches!(container.start(), Err(Error::Lifecycle { .. })));
    assert_eq!(container.state(), LifecycleState::Running);
}

#[test]
fn test_failure_marks_container_failed() {
    let mut container = Container::new().register::<Failing>();

    assert!(matches!(container.start(), Err(Error::Instantiation { .. })));
    assert_eq!(container.state(), LifecycleState::Failed);
    assert!(container.graph().is_none());
    assert!(matches!(container.start(), Err(Error::Lifecycle { .. })));
}

#[test]
fn test_cycle_aborts_start() {
    let mut container = Container::new().with_module_roots([CYCLIC_ROOT]);

    assert!(matches!(container.start(), Err(Error::CyclicDependency { .. })));
    assert_eq!(container.state(), LifecycleState::Failed);
}

#[test]
fn test_externals_form_a_closed_list() {
    let mut without = Container::new().register::<Stamp>();
    assert!(matches!(without.start(), Err(Error::UnresolvedDependency { .. })));

    let mut with = Container::new()
        .register::<Stamp>()
        .provide(Arc::new(Clock { now: 7 }));
    let graph = with.start().unwrap();
    assert_eq!(graph.get::<Stamp>().unwrap().clock.now, 7);
}

#[test]
fn test_unresolved_dependency_aborts_start() {
    let mut container = Container::new().register::<Orphan>();
    assert!(matches!(container.start(), Err(Error::UnresolvedDependency { .. })));
}

#[test]
fn test_config_source_makes_reader_injectable() {
    let source = Arc::new(MemoryConfigSource::new().with("greeter.message", "Hello"));
    let mut container = Container::new()
        .register::<Greeter>()
        .with_config_source(source.clone());
    let graph = container.start().unwrap();
    let greeter = graph.get::<Greeter>().unwrap();

    assert_eq!(greeter.greet().unwrap(), "Hello, world");

    // Values are read on every call
    source.set("greeter.message", "Hi");
    source.set("greeting.audience", "team");
    assert_eq!(greeter.greet().unwrap(), "Hi, team");
}

#[test]
fn test_shutdown_releases_graph() {
    let mut container = Container::new().register::<Repository>();
    let graph = container.start().unwrap();
    container.shutdown();

    assert_eq!(container.state(), LifecycleState::ShutDown);
    assert!(container.graph().is_none());
    assert!(container.routes().is_empty());
    // Handles obtained earlier stay valid
    assert!(graph.get::<Repository>().is_some());
}
