//! Server Initialization
//!
//! Loads configuration, installs logging, starts the container over the
//! configured module roots and launches Rocket with the bound routes.
//!
//! # Configuration
//!
//! - Config file: `trellis.toml`, `config/trellis.toml` or the user config dir
//! - Environment variables: `TRELLIS_SERVER__PORT=9000`
//! - Command line overrides: [`ServerOptions`]

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use trellis_domain::{ConfigSource, Result};
use trellis_infrastructure::config::{AppConfig, ConfigLoader};
use trellis_infrastructure::di::Container;
use trellis_infrastructure::error_ext::ErrorContext;
use trellis_infrastructure::logging::init_logging;

use crate::demo;
use crate::transport::http::RocketServer;

/// Overrides applied on top of the loaded configuration
#[derive(Debug, Clone, Default)]
pub struct ServerOptions {
    /// Explicit configuration file
    pub config_path: Option<PathBuf>,
    /// Module roots replacing `container.module_roots`
    pub module_roots: Vec<String>,
    /// Port replacing `server.port`
    pub port: Option<u16>,
}

/// Run the Trellis server until Rocket shuts down
pub async fn run_server(options: ServerOptions) -> anyhow::Result<()> {
    let loader = match &options.config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    let (mut config, source) = loader.load_with_source()?;
    apply_options(&mut config, options);
    init_logging(&config.logging)?;

    info!(
        address = %config.server.address,
        port = config.server.port,
        roots = ?config.container.module_roots,
        "Starting Trellis server"
    );

    let (mut container, server) = start_container(&config, Arc::new(source))?;
    let rocket = server.rocket()?;
    let launched = rocket.launch().await;
    container.shutdown();

    launched.server_context("Rocket server failed")?;
    Ok(())
}

/// Start a container whose controllers are served by a new [`RocketServer`]
pub fn start_container(
    config: &AppConfig,
    source: Arc<dyn ConfigSource>,
) -> Result<(Container, RocketServer)> {
    let server = RocketServer::new(config.server.clone());
    let mut container = Container::new()
        .with_module_roots(config.container.module_roots.iter().cloned())
        .with_config_source(source)
        .append(Arc::new(server.clone()));
    container.start()?;
    Ok((container, server))
}

fn apply_options(config: &mut AppConfig, options: ServerOptions) {
    if let Some(port) = options.port {
        config.server.port = port;
    }
    if !options.module_roots.is_empty() {
        config.container.module_roots = options.module_roots;
    }
    if config.container.module_roots.is_empty() {
        config.container.module_roots.push(demo::MODULE_ROOT.to_string());
    }
}
