//! Ports implemented by external collaborators
//!
//! | Port | Implemented by |
//! |------|----------------|
//! | [`HttpServer`] | `trellis_server::RocketServer` |
//! | [`ConfigSource`] | `FigmentConfigSource`, `MemoryConfigSource` |

pub mod config_source;
pub mod http_server;

pub use config_source::ConfigSource;
pub use http_server::HttpServer;
