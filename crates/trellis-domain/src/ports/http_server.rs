//! HTTP server port

use crate::error::Result;
use crate::handler::Endpoint;

/// Registration primitive of the external HTTP server
///
/// The container calls [`HttpServer::register`] once per bound route during
/// bootstrap and never touches sockets or request parsing. Implementations
/// are shared handles (`Arc<dyn HttpServer>`), so registration takes `&self`.
pub trait HttpServer: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Register an endpoint under its verb and full path
    fn register(&self, endpoint: Endpoint) -> Result<()>;
}
