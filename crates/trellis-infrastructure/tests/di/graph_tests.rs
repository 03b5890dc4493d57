//! Object graph construction tests

use std::sync::Arc;

use trellis_domain::Error;
use trellis_infrastructure::di::{
    resolve, Catalog, ComponentDescriptor, ExternalProviders, ObjectGraph,
};

use crate::test_utils::explicit::{Clock, Failing, Sneaky, Stamp};
use crate::test_utils::shop::{CatalogService, Repository, ShopController};
use crate::test_utils::SHOP_ROOT;

fn build(catalog: Catalog, externals: &ExternalProviders) -> trellis_domain::Result<ObjectGraph> {
    let ordered = resolve(catalog, externals)?;
    ObjectGraph::build(ordered, externals)
}

#[test]
fn test_each_component_has_one_shared_instance() {
    let graph = build(Catalog::scan(&[SHOP_ROOT]).unwrap(), &ExternalProviders::new()).unwrap();

    let repo = graph.get::<Repository>().unwrap();
    let service = graph.get::<CatalogService>().unwrap();
    let controller = graph.get::<ShopController>().unwrap();

    assert!(Arc::ptr_eq(&service.repo, &repo));
    assert!(Arc::ptr_eq(&controller.catalog, &service));
    assert_eq!(graph.len(), 3);
    assert_eq!(graph.controllers().count(), 1);
}

#[test]
fn test_lookup_by_name() {
    let graph = build(Catalog::scan(&[SHOP_ROOT]).unwrap(), &ExternalProviders::new()).unwrap();
    let name = std::any::type_name::<CatalogService>();

    assert_eq!(graph.get_by_name(name).unwrap().descriptor().name(), name);
    assert!(graph.get_by_name("nowhere::Thing").is_none());
}

#[test]
fn test_external_provider_is_injected_as_is() {
    let clock = Arc::new(Clock { now: 42 });
    let mut externals = ExternalProviders::new();
    externals.insert(Arc::clone(&clock));

    let catalog = Catalog::from_descriptors(vec![ComponentDescriptor::of::<Stamp>()]).unwrap();
    let graph = build(catalog, &externals).unwrap();
    let stamp = graph.get::<Stamp>().unwrap();

    assert!(Arc::ptr_eq(&stamp.clock, &clock));
    assert_eq!(stamp.clock.now, 42);
    assert!(graph.get::<Clock>().is_none());
}

#[test]
fn test_constructor_failure_is_wrapped() {
    let catalog = Catalog::from_descriptors(vec![ComponentDescriptor::of::<Failing>()]).unwrap();

    match build(catalog, &ExternalProviders::new()) {
        Err(Error::Instantiation { component, source }) => {
            assert!(component.ends_with("::Failing"));
            assert_eq!(source.to_string(), "database unreachable");
        }
        other => panic!("expected instantiation error, got {other:?}"),
    }
}

#[test]
fn test_undeclared_dependency_is_not_reachable() {
    let catalog = Catalog::from_descriptors(vec![
        ComponentDescriptor::of::<Repository>(),
        ComponentDescriptor::of::<Sneaky>(),
    ])
    .unwrap();

    let err = build(catalog, &ExternalProviders::new()).unwrap_err();
    assert!(matches!(err, Error::Instantiation { .. }));
    assert!(err.to_string().contains("<undeclared>"));
}
