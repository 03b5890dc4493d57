//! Trellis - Entry Point
//!
//! Loads configuration, starts the container over the configured module
//! roots and serves the bound routes with Rocket.
//!
//! | Flag | Overrides |
//! |------|-----------|
//! | `--config PATH` | default config file search |
//! | `--module ROOT` (repeatable) | `container.module_roots` |
//! | `--port N` | `server.port` |

use std::path::PathBuf;

use clap::Parser;
use trellis::{run_server, ServerOptions};

/// Command line interface for Trellis
#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(about = "Trellis - Dependency injection container with HTTP route binding")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Module root scanned for components (repeatable)
    #[arg(short, long = "module", value_name = "ROOT")]
    pub modules: Vec<String>,

    /// HTTP port
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl From<Cli> for ServerOptions {
    fn from(cli: Cli) -> Self {
        Self {
            config_path: cli.config,
            module_roots: cli.modules,
            port: cli.port,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_server(cli.into()).await
}
