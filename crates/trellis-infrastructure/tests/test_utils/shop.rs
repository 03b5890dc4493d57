//! Healthy fixture graph

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;
use trellis_domain::{BoxError, HandlerError, Role};
use trellis_infrastructure::di::{Dependency, Injectable, Injector, Routes};
use trellis_infrastructure::register_component;

/// Leaf component
pub struct Repository {
    lookups: AtomicUsize,
}

impl Repository {
    pub fn lookup(&self, id: &str) -> String {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        format!("item-{id}")
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Injectable for Repository {
    const ROLE: Role = Role::Component;

    fn construct(_injector: &Injector<'_>) -> Result<Self, BoxError> {
        Ok(Self {
            lookups: AtomicUsize::new(0),
        })
    }
}

pub struct CatalogService {
    pub repo: Arc<Repository>,
}

impl Injectable for CatalogService {
    const ROLE: Role = Role::Service;

    fn dependencies() -> Vec<Dependency> {
        vec![Dependency::on::<Repository>("repo")]
    }

    fn construct(injector: &Injector<'_>) -> Result<Self, BoxError> {
        Ok(Self {
            repo: injector.get()?,
        })
    }
}

pub struct ShopController {
    pub catalog: Arc<CatalogService>,
}

impl Injectable for ShopController {
    const ROLE: Role = Role::Controller;
    const PREFIX: Option<&'static str> = Some("/api/v1");

    fn dependencies() -> Vec<Dependency> {
        vec![Dependency::on::<CatalogService>("catalog")]
    }

    fn construct(injector: &Injector<'_>) -> Result<Self, BoxError> {
        Ok(Self {
            catalog: injector.get()?,
        })
    }

    fn routes(routes: &mut Routes<Self>) {
        routes
            .get("hello")
            .to("hello", |_this, _args| async move { Ok(json!("hello")) });
        routes
            .get("item/<item_id>")
            .params(["item_id"])
            .to("find_item", |this, args| async move {
                let id = args.path("item_id")?;
                Ok(json!({ "id": id, "name": this.catalog.repo.lookup(id) }))
            });
        routes
            .post("items")
            .params(["item"])
            .to("create_item", |_this, args| async move {
                let item: serde_json::Value = args.body("item")?;
                if item.is_null() {
                    return Err(HandlerError::bad_request("item is required"));
                }
                Ok(item)
            });
    }
}

register_component!(SHOP_REPOSITORY, Repository);
register_component!(SHOP_CATALOG, CatalogService);
register_component!(SHOP_CONTROLLER, ShopController);
