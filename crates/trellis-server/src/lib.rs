//! # Trellis Server
//!
//! Connects the container to Rocket: every bound controller route becomes a
//! `rocket::Route` served by [`RocketServer`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trellis_server::{run_server, ServerOptions};
//!
//! #[rocket::main]
//! async fn main() -> anyhow::Result<()> {
//!     run_server(ServerOptions::default()).await
//! }
//! ```
//!
//! ## Core Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RocketServer`] | `HttpServer` implementation collecting Rocket routes |
//! | [`ServerOptions`] | Command line overrides applied on top of the loaded config |

pub mod demo;
pub mod init;
pub mod transport;

pub use init::{run_server, start_container, ServerOptions};
pub use transport::http::RocketServer;
