//! Catalog discovery tests

use trellis_domain::{Error, Role};
use trellis_infrastructure::di::{Catalog, ComponentDescriptor};

use crate::test_utils::explicit::{
    PlaceholderPrefix, PrefixedComponent, RepeatedConstructorParam, RepeatedRouteParam,
    RoutedService, UndeclaredPlaceholder,
};
use crate::test_utils::shop::{Repository, ShopController};
use crate::test_utils::SHOP_ROOT;

#[test]
fn test_scan_discovers_components_below_root() {
    let catalog = Catalog::scan(&[SHOP_ROOT]).unwrap();
    let names: Vec<_> = catalog.descriptors().iter().map(|d| d.short_name()).collect();

    assert_eq!(names, vec!["CatalogService", "Repository", "ShopController"]);
}

#[test]
fn test_scan_accepts_parent_module() {
    let catalog = Catalog::scan(&["integration::test_utils"]).unwrap();

    assert!(catalog.get(std::any::type_name::<Repository>()).is_some());
    assert!(catalog.len() >= 5);
}

#[test]
fn test_scan_ignores_unrelated_roots() {
    let catalog = Catalog::scan(&["integration::test_utils::sho"]).unwrap();
    assert!(catalog.is_empty());

    let catalog = Catalog::scan::<&str>(&[]).unwrap();
    assert!(catalog.is_empty());
}

#[test]
fn test_descriptor_metadata() {
    let catalog = Catalog::scan(&[SHOP_ROOT]).unwrap();
    let controller = catalog
        .get(std::any::type_name::<ShopController>())
        .unwrap();

    assert_eq!(controller.role(), Role::Controller);
    assert_eq!(controller.module(), SHOP_ROOT);
    assert_eq!(controller.prefix(), Some("/api/v1"));
    assert_eq!(controller.dependencies()[0].parameter, "catalog");
    let methods: Vec<_> = controller.routes().iter().map(|r| r.method.as_str()).collect();
    assert_eq!(methods, vec!["hello", "find_item", "create_item"]);
}

#[test]
fn test_explicit_registrations_follow_scanned_ones() {
    let catalog =
        Catalog::scan_with(&[SHOP_ROOT], vec![ComponentDescriptor::of::<crate::test_utils::explicit::Failing>()])
            .unwrap();

    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.descriptors()[3].short_name(), "Failing");
}

#[test]
fn test_duplicate_registration_is_rejected() {
    let result = Catalog::scan_with(&[SHOP_ROOT], vec![ComponentDescriptor::of::<Repository>()]);

    match result {
        Err(Error::Discovery { message }) => assert!(message.contains("more than once")),
        other => panic!("expected discovery error, got {other:?}"),
    }
}

#[test]
fn test_routes_on_non_controller_are_rejected() {
    let result = Catalog::from_descriptors(vec![ComponentDescriptor::of::<RoutedService>()]);

    match result {
        Err(Error::Discovery { message }) => assert!(message.contains("not a controller")),
        other => panic!("expected discovery error, got {other:?}"),
    }
}

#[test]
fn test_placeholder_without_parameter_is_rejected() {
    let result =
        Catalog::from_descriptors(vec![ComponentDescriptor::of::<UndeclaredPlaceholder>()]);

    match result {
        Err(Error::Discovery { message }) => assert!(message.contains("<item_id>")),
        other => panic!("expected discovery error, got {other:?}"),
    }
}

#[test]
fn test_prefix_on_non_controller_is_rejected() {
    let result = Catalog::from_descriptors(vec![ComponentDescriptor::of::<PrefixedComponent>()]);

    match result {
        Err(Error::Discovery { message }) => {
            assert!(message.contains("path prefix"));
            assert!(message.contains("not a controller"));
        }
        other => panic!("expected discovery error, got {other:?}"),
    }
}

#[test]
fn test_placeholder_in_prefix_is_rejected() {
    let result = Catalog::from_descriptors(vec![ComponentDescriptor::of::<PlaceholderPrefix>()]);

    match result {
        Err(Error::Discovery { message }) => assert!(message.contains("<tenant>")),
        other => panic!("expected discovery error, got {other:?}"),
    }
}

#[test]
fn test_repeated_route_parameter_is_rejected() {
    let result = Catalog::from_descriptors(vec![ComponentDescriptor::of::<RepeatedRouteParam>()]);

    match result {
        Err(Error::Discovery { message }) => {
            assert!(message.contains("parameter `order_id` twice"));
        }
        other => panic!("expected discovery error, got {other:?}"),
    }
}

#[test]
fn test_repeated_constructor_parameter_is_rejected() {
    let result =
        Catalog::from_descriptors(vec![ComponentDescriptor::of::<RepeatedConstructorParam>()]);

    match result {
        Err(Error::Discovery { message }) => {
            assert!(message.contains("constructor parameter `repository` twice"));
        }
        other => panic!("expected discovery error, got {other:?}"),
    }
}
