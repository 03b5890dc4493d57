//! Config reader
//!
//! The injectable view over a [`ConfigSource`]. Every read queries the
//! source; nothing is cached.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use trellis_domain::{ConfigSource, Error, Result};

use super::keys::ConfigKey;

/// Reads configuration values by [`ConfigKey`]
#[derive(Clone)]
pub struct ConfigReader {
    source: Arc<dyn ConfigSource>,
}

impl ConfigReader {
    /// Create a reader over a source
    pub fn new(source: Arc<dyn ConfigSource>) -> Self {
        Self { source }
    }

    /// Raw value of a key
    ///
    /// Fails with [`Error::ConfigKeyNotFound`] naming the looked-up key.
    pub fn read(&self, key: &ConfigKey) -> Result<String> {
        self.read_key(&key.key())
    }

    /// Raw value of a literal dotted key
    pub fn read_key(&self, key: &str) -> Result<String> {
        self.source
            .get(key)
            .ok_or_else(|| Error::config_key_not_found(key))
    }

    /// Value of a key parsed into `T`
    pub fn read_as<T>(&self, key: &ConfigKey) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let raw = self.read(key)?;
        raw.parse().map_err(|err| {
            Error::configuration(format!("Config key {key} has invalid value '{raw}': {err}"))
        })
    }

    /// Value of a key, or `default` when absent
    pub fn read_or(&self, key: &ConfigKey, default: impl Into<String>) -> String {
        self.source.get(&key.key()).unwrap_or_else(|| default.into())
    }

    /// Whether the source holds the key
    pub fn contains(&self, key: &ConfigKey) -> bool {
        self.source.get(&key.key()).is_some()
    }
}

impl fmt::Debug for ConfigReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigReader").finish_non_exhaustive()
    }
}
