//! DI Layer Tests
//!
//! - Catalog discovery and declaration validation
//! - Dependency resolution order, unresolved parameters, cycles
//! - Object graph construction and singleton sharing
//! - Container lifecycle

mod catalog_tests;
mod graph_tests;
mod lifecycle_tests;
