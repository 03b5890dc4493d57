//! Route binding
//!
//! Wires controller methods to the external HTTP server. Request dispatch
//! itself belongs to the server.

pub mod binder;

pub use binder::{bind, endpoints, BoundRoute};
