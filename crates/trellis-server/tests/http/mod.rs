//! HTTP Tests
//!
//! Requests dispatched through Rocket's local client against routes bound
//! by the container.
