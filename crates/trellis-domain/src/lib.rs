//! # Trellis Domain
//!
//! Core types shared by every layer of the container: the error taxonomy,
//! component roles, HTTP verbs, route path templates, handler plumbing and
//! the ports implemented by external collaborators.
//!
//! This crate performs no I/O.

pub mod constants;
pub mod error;
pub mod handler;
pub mod ports;
pub mod value_objects;

pub use error::{BoxError, Error, Result};
pub use handler::{
    Argument, Endpoint, HandlerError, HandlerFuture, HandlerResult, Invoker, RouteArgs,
};
pub use ports::{ConfigSource, HttpServer};
pub use value_objects::{PathTemplate, Role, Segment, Verb};
