//! # Infrastructure Layer
//!
//! The container itself and the technical concerns around it.
//!
//! ### Dependency Injection
//! | Module | Description |
//! |--------|-------------|
//! | [`di`] | Catalog, resolver, object graph, container lifecycle |
//! | [`routing`] | Controller route binding |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment loading, config keys and reader |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;
pub mod routing;

pub use config::{ConfigKey, ConfigReader};
pub use di::{Container, Dependency, Injectable, Injector, LifecycleState, ObjectGraph, Routes};
pub use error_ext::ErrorContext;
