//! Configuration source port

use std::collections::HashMap;

/// External key-value configuration source
///
/// Keys are dotted paths such as `url.endpoint`. The container only derives
/// keys and calls [`ConfigSource::get`]; caching, if any, is the source's
/// own business.
pub trait ConfigSource: Send + Sync {
    /// Value stored under `key`, if present
    fn get(&self, key: &str) -> Option<String>;
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}
