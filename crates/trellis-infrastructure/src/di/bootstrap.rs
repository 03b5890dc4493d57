//! Container Bootstrap - Scan, Resolve, Build, Bind
//!
//! The composition root. A [`Container`] is an explicit value: it is
//! configured through builder methods, started once, and owns the object
//! graph until it is shut down.
//!
//! ```text
//! Unstarted ─► Scanned ─► Resolved ─► Built ─► Bound ─► Running ─► ShutDown
//!     │           │           │          │        │
//!     └───────────┴───────────┴──────────┴────────┴──► Failed
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut container = Container::new()
//!     .with_module_roots(["my_app::web"])
//!     .with_config_source(Arc::new(MemoryConfigSource::new()))
//!     .append(Arc::new(server.clone()));
//!
//! let graph = container.start()?;
//! let users = graph.get::<UserService>();
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info};
use trellis_domain::{ConfigSource, Error, HttpServer, Result};

use super::catalog::Catalog;
use super::component::Injectable;
use super::descriptor::ComponentDescriptor;
use super::graph::{ExternalProviders, ObjectGraph};
use super::resolver;
use crate::config::ConfigReader;
use crate::routing::{self, BoundRoute};

/// Bootstrap phase of a [`Container`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Configured, nothing discovered yet
    Unstarted,
    /// Catalog discovered and validated
    Scanned,
    /// Dependency order computed
    Resolved,
    /// Every singleton constructed
    Built,
    /// Controller routes registered
    Bound,
    /// Ready to serve
    Running,
    /// A bootstrap phase failed
    Failed,
    /// Graph released
    ShutDown,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unstarted => "unstarted",
            Self::Scanned => "scanned",
            Self::Resolved => "resolved",
            Self::Built => "built",
            Self::Bound => "bound",
            Self::Running => "running",
            Self::Failed => "failed",
            Self::ShutDown => "shut_down",
        };
        f.write_str(name)
    }
}

/// Dependency injection container
pub struct Container {
    state: LifecycleState,
    module_roots: Vec<String>,
    explicit: Vec<ComponentDescriptor>,
    externals: ExternalProviders,
    servers: Vec<Arc<dyn HttpServer>>,
    graph: Option<Arc<ObjectGraph>>,
    routes: Vec<BoundRoute>,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    /// Create an unstarted container with no roots, providers or servers
    pub fn new() -> Self {
        Self {
            state: LifecycleState::Unstarted,
            module_roots: Vec::new(),
            explicit: Vec::new(),
            externals: ExternalProviders::new(),
            servers: Vec::new(),
            graph: None,
            routes: Vec::new(),
        }
    }

    /// Add module roots scanned for registered components
    pub fn with_module_roots<I, S>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.module_roots.extend(roots.into_iter().map(Into::into));
        self
    }

    /// Register a component explicitly, after the scanned ones
    pub fn register<T: Injectable>(mut self) -> Self {
        self.explicit.push(ComponentDescriptor::of::<T>());
        self
    }

    /// Supply an external dependency of type `T`
    pub fn provide<T: Send + Sync + 'static>(mut self, instance: Arc<T>) -> Self {
        self.externals.insert(instance);
        self
    }

    /// Attach a config source, making [`ConfigReader`] injectable
    pub fn with_config_source(self, source: Arc<dyn ConfigSource>) -> Self {
        self.provide(Arc::new(ConfigReader::new(source)))
    }

    /// Append an HTTP server that receives every controller route
    pub fn append(mut self, server: Arc<dyn HttpServer>) -> Self {
        self.servers.push(server);
        self
    }

    /// Current phase
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Object graph, once running
    pub fn graph(&self) -> Option<Arc<ObjectGraph>> {
        self.graph.clone()
    }

    /// Routes bound during start
    pub fn routes(&self) -> &[BoundRoute] {
        &self.routes
    }

    /// Run every bootstrap phase
    ///
    /// Returns the shared object graph. Any failure leaves the container in
    /// [`LifecycleState::Failed`].
    pub fn start(&mut self) -> Result<Arc<ObjectGraph>> {
        if self.state != LifecycleState::Unstarted {
            return Err(Error::lifecycle(format!(
                "Container cannot start from state '{}'",
                self.state
            )));
        }
        info!(
            roots = ?self.module_roots,
            explicit = self.explicit.len(),
            externals = ?self.externals.type_names(),
            servers = self.servers.len(),
            "Starting container"
        );

        match self.run_phases() {
            Ok(graph) => {
                self.transition(LifecycleState::Running);
                info!(
                    components = graph.len(),
                    routes = self.routes.len(),
                    "Container running"
                );
                Ok(graph)
            }
            Err(err) => {
                error!(phase = %self.state, error = %err, "Container bootstrap failed");
                self.transition(LifecycleState::Failed);
                Err(err)
            }
        }
    }

    fn run_phases(&mut self) -> Result<Arc<ObjectGraph>> {
        let catalog = Catalog::scan_with(&self.module_roots, std::mem::take(&mut self.explicit))?;
        self.transition(LifecycleState::Scanned);

        let ordered = resolver::resolve(catalog, &self.externals)?;
        self.transition(LifecycleState::Resolved);

        let graph = Arc::new(ObjectGraph::build(ordered, &self.externals)?);
        self.transition(LifecycleState::Built);

        self.routes = routing::bind(&graph, &self.servers)?;
        self.transition(LifecycleState::Bound);

        self.graph = Some(Arc::clone(&graph));
        Ok(graph)
    }

    /// Release the object graph
    pub fn shutdown(&mut self) {
        if self.state == LifecycleState::ShutDown {
            return;
        }
        self.graph = None;
        self.routes.clear();
        self.transition(LifecycleState::ShutDown);
        info!("Container shut down");
    }

    fn transition(&mut self, next: LifecycleState) {
        debug!(from = %self.state, to = %next, "Container state transition");
        self.state = next;
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("state", &self.state)
            .field("module_roots", &self.module_roots)
            .field("externals", &self.externals)
            .field("servers", &self.servers.len())
            .field("graph", &self.graph)
            .finish()
    }
}
