//! Config source implementations
//!
//! | Source | Backing |
//! |--------|---------|
//! | [`FigmentConfigSource`] | merged TOML file + environment |
//! | [`MemoryConfigSource`] | in-process map, for tests and embedding |

use std::collections::HashMap;
use std::sync::RwLock;

use figment::Figment;
use trellis_domain::ConfigSource;

/// Config source reading dotted keys from a merged [`Figment`]
#[derive(Debug, Clone)]
pub struct FigmentConfigSource {
    figment: Figment,
}

impl FigmentConfigSource {
    /// Wrap a merged figment
    pub fn new(figment: Figment) -> Self {
        Self { figment }
    }
}

impl ConfigSource for FigmentConfigSource {
    fn get(&self, key: &str) -> Option<String> {
        let value = self.figment.find_value(key).ok()?;
        match value.clone().into_string() {
            Some(text) => Some(text),
            None => serde_json::to_value(&value).ok().map(|json| json.to_string()),
        }
    }
}

/// Mutable in-memory config source
///
/// Values set after the container started are visible to the next read.
#[derive(Debug, Default)]
pub struct MemoryConfigSource {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryConfigSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion
    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace a value
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.into(), value.into());
        }
    }

    /// Remove a value
    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.write().ok()?.remove(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryConfigSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let values = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }
}

impl ConfigSource for MemoryConfigSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }
}
