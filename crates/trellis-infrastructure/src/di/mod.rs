//! Dependency Injection - Catalog, Resolver, Object Graph
//!
//! ## Architecture
//!
//! ```text
//! Catalog::scan ──► resolver::resolve ──► ObjectGraph::build ──► routing::bind
//!   (linkme)          (topological)         (singletons)          (controllers)
//! ```
//!
//! [`Container`] runs the whole sequence once through
//! [`Container::start`].
//!
//! ## Key Principles
//!
//! - **Static matching**: dependencies are declared by type, no reflection
//! - **Singletons only**: one instance per component, shared through `Arc`
//! - **Closed externals**: unmatched parameters resolve only against
//!   explicitly provided types

pub mod bootstrap;
pub mod catalog;
pub mod component;
pub mod descriptor;
pub mod graph;
pub mod registry;
pub mod resolver;

pub use bootstrap::{Container, LifecycleState};
pub use catalog::Catalog;
pub use component::{Dependency, Injectable, Instance, RouteBuilder, RouteDecl, Routes};
pub use descriptor::{ComponentDescriptor, MethodRouteDescriptor};
pub use graph::{ExternalProviders, Injector, ManagedInstance, ObjectGraph};
pub use resolver::resolve;
