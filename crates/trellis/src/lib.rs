//! # Trellis
//!
//! A lightweight dependency injection container with HTTP route binding.
//!
//! Components declare their role and constructor dependencies through
//! [`Injectable`](prelude::Injectable). The container discovers them below a
//! set of module roots, orders them by dependency, builds exactly one
//! instance of each and binds controller methods to HTTP routes.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use trellis::prelude::*;
//!
//! pub struct Clock;
//!
//! impl Injectable for Clock {
//!     const ROLE: Role = Role::Component;
//!
//!     fn construct(_injector: &Injector<'_>) -> Result<Self, BoxError> {
//!         Ok(Clock)
//!     }
//! }
//!
//! register_component!(CLOCK, Clock);
//!
//! let mut container = Container::new().with_module_roots([module_path!()]);
//! let graph = container.start()?;
//! let clock: Arc<Clock> = graph.get().unwrap();
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Errors, value objects, handler types and ports
//! - `infrastructure` - Catalog, resolver, object graph, binder, configuration, logging
//! - `server` - Rocket adapter and server initialization

/// Domain layer - errors, value objects and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use trellis_domain::*;
}

/// Infrastructure layer - container, configuration and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use trellis_infrastructure::*;
}

/// Server layer - Rocket adapter and initialization
///
/// Re-exports from the server crate for convenience
pub mod server {
    pub use trellis_server::*;
}

/// Everything needed to declare and run components
pub mod prelude {
    pub use trellis_domain::{
        BoxError, ConfigSource, Error, HandlerError, HandlerResult, HttpServer, Role, RouteArgs,
        Verb,
    };
    pub use trellis_infrastructure::config::{ConfigKey, ConfigReader, MemoryConfigSource};
    pub use trellis_infrastructure::di::{
        Container, Dependency, Injectable, Injector, LifecycleState, ObjectGraph, Routes,
    };
    pub use trellis_infrastructure::{config_keys, register_component};
    pub use trellis_server::RocketServer;
}

// Re-export commonly used domain types at the crate root
pub use domain::{Error, Result};

// Re-export main entry point at the crate root
pub use server::{run_server, ServerOptions};
