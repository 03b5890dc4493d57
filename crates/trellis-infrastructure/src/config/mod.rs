//! Configuration
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | `AppConfig` and its sections |
//! | [`loader`] | Figment loader: defaults, TOML file, environment |
//! | [`source`] | `ConfigSource` implementations |
//! | [`keys`] | Config key holders and key derivation |
//! | [`reader`] | Injectable `ConfigReader` |

pub mod keys;
pub mod loader;
pub mod reader;
pub mod source;
pub mod types;

pub use keys::{derive_key, section_name, ConfigKey};
pub use loader::ConfigLoader;
pub use reader::ConfigReader;
pub use source::{FigmentConfigSource, MemoryConfigSource};
pub use types::{AppConfig, ContainerConfig, LoggingConfig, ServerConfig};
