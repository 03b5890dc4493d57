//! Components added by explicit registration only

use std::sync::Arc;

use serde_json::json;
use trellis_domain::{BoxError, HandlerError, Role};
use trellis_infrastructure::config::ConfigReader;
use trellis_infrastructure::config_keys;
use trellis_infrastructure::di::{Dependency, Injectable, Injector, Routes};

use super::shop::Repository;

/// Never registered anywhere
pub struct Missing;

pub struct Orphan {
    pub missing: Arc<Missing>,
}

impl Injectable for Orphan {
    const ROLE: Role = Role::Service;

    fn dependencies() -> Vec<Dependency> {
        vec![Dependency::on::<Missing>("missing")]
    }

    fn construct(injector: &Injector<'_>) -> Result<Self, BoxError> {
        Ok(Self {
            missing: injector.get()?,
        })
    }
}

pub struct SelfLoop;

impl Injectable for SelfLoop {
    const ROLE: Role = Role::Component;

    fn dependencies() -> Vec<Dependency> {
        vec![Dependency::on::<SelfLoop>("me")]
    }

    fn construct(_injector: &Injector<'_>) -> Result<Self, BoxError> {
        Ok(Self)
    }
}

pub struct Failing;

impl Injectable for Failing {
    const ROLE: Role = Role::Service;

    fn construct(_injector: &Injector<'_>) -> Result<Self, BoxError> {
        Err("database unreachable".into())
    }
}

/// Asks for a dependency it never declared
pub struct Sneaky;

impl Injectable for Sneaky {
    const ROLE: Role = Role::Service;

    fn construct(injector: &Injector<'_>) -> Result<Self, BoxError> {
        injector.get::<Repository>()?;
        Ok(Self)
    }
}

/// Services cannot expose routes
pub struct RoutedService;

impl Injectable for RoutedService {
    const ROLE: Role = Role::Service;

    fn construct(_injector: &Injector<'_>) -> Result<Self, BoxError> {
        Ok(Self)
    }

    fn routes(routes: &mut Routes<Self>) {
        routes
            .get("nope")
            .to("nope", |_this, _args| async move { Ok(json!(null)) });
    }
}

/// Same verb and path shape as `ShopController::find_item`
pub struct ClashingController;

impl Injectable for ClashingController {
    const ROLE: Role = Role::Controller;
    const PREFIX: Option<&'static str> = Some("api/v1/");

    fn construct(_injector: &Injector<'_>) -> Result<Self, BoxError> {
        Ok(Self)
    }

    fn routes(routes: &mut Routes<Self>) {
        routes
            .get("/item/<id>")
            .params(["id"])
            .to("other_item", |_this, _args| async move { Ok(json!(null)) });
    }
}

/// Same path as `ShopController::find_item` under a different verb
pub struct UpdateController;

impl Injectable for UpdateController {
    const ROLE: Role = Role::Controller;
    const PREFIX: Option<&'static str> = Some("/api/v1");

    fn construct(_injector: &Injector<'_>) -> Result<Self, BoxError> {
        Ok(Self)
    }

    fn routes(routes: &mut Routes<Self>) {
        routes
            .put("item/<item_id>")
            .params(["item_id", "patch"])
            .to("update_item", |_this, args| async move {
                let id = args.path("item_id")?.to_string();
                let patch: serde_json::Value = args.body("patch")?;
                Ok(json!({ "id": id, "patch": patch }))
            });
    }
}

/// Placeholder without a declared parameter
pub struct UndeclaredPlaceholder;

impl Injectable for UndeclaredPlaceholder {
    const ROLE: Role = Role::Controller;

    fn construct(_injector: &Injector<'_>) -> Result<Self, BoxError> {
        Ok(Self)
    }

    fn routes(routes: &mut Routes<Self>) {
        routes
            .delete("item/<item_id>")
            .to("remove", |_this, _args| async move { Ok(json!(null)) });
    }
}

/// Components cannot carry a path prefix
pub struct PrefixedComponent;

impl Injectable for PrefixedComponent {
    const ROLE: Role = Role::Component;
    const PREFIX: Option<&'static str> = Some("/internal");

    fn construct(_injector: &Injector<'_>) -> Result<Self, BoxError> {
        Ok(Self)
    }
}

/// Prefix placeholders have no method parameter to bind to
pub struct PlaceholderPrefix;

impl Injectable for PlaceholderPrefix {
    const ROLE: Role = Role::Controller;
    const PREFIX: Option<&'static str> = Some("/tenants/<tenant>");

    fn construct(_injector: &Injector<'_>) -> Result<Self, BoxError> {
        Ok(Self)
    }

    fn routes(routes: &mut Routes<Self>) {
        routes
            .get("status")
            .to("status", |_this, _args| async move { Ok(json!(null)) });
    }
}

pub struct RepeatedRouteParam;

impl Injectable for RepeatedRouteParam {
    const ROLE: Role = Role::Controller;

    fn construct(_injector: &Injector<'_>) -> Result<Self, BoxError> {
        Ok(Self)
    }

    fn routes(routes: &mut Routes<Self>) {
        routes
            .post("orders/<order_id>")
            .params(["order_id", "order_id"])
            .to("place", |_this, _args| async move { Ok(json!(null)) });
    }
}

pub struct RepeatedConstructorParam {
    pub repository: Arc<Repository>,
}

impl Injectable for RepeatedConstructorParam {
    const ROLE: Role = Role::Service;

    fn dependencies() -> Vec<Dependency> {
        vec![
            Dependency::on::<Repository>("repository"),
            Dependency::on::<Repository>("repository"),
        ]
    }

    fn construct(injector: &Injector<'_>) -> Result<Self, BoxError> {
        Ok(Self {
            repository: injector.get()?,
        })
    }
}

config_keys! {
    /// Keys read by [`Greeter`]
    pub struct GreeterKeys {
        MESSAGE,
        AUDIENCE = "greeting.audience",
    }
}

/// Reads its configuration lazily, on every call
pub struct Greeter {
    config: Arc<ConfigReader>,
}

impl Greeter {
    pub fn greet(&self) -> Result<String, HandlerError> {
        let message = self.config.read(&GreeterKeys::MESSAGE)?;
        let audience = self.config.read_or(&GreeterKeys::AUDIENCE, "world");
        Ok(format!("{message}, {audience}"))
    }
}

impl Injectable for Greeter {
    const ROLE: Role = Role::Service;

    fn dependencies() -> Vec<Dependency> {
        vec![Dependency::on::<ConfigReader>("config")]
    }

    fn construct(injector: &Injector<'_>) -> Result<Self, BoxError> {
        Ok(Self {
            config: injector.get()?,
        })
    }
}

/// Supplied through `Container::provide`
pub struct Clock {
    pub now: u64,
}

pub struct Stamp {
    pub clock: Arc<Clock>,
}

impl Injectable for Stamp {
    const ROLE: Role = Role::Component;

    fn dependencies() -> Vec<Dependency> {
        vec![Dependency::on::<Clock>("clock")]
    }

    fn construct(injector: &Injector<'_>) -> Result<Self, BoxError> {
        Ok(Self {
            clock: injector.get()?,
        })
    }
}
