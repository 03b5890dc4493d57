//! Config key holders
//!
//! A holder groups the configuration keys a component reads. Each key is
//! derived from the holder name and the attribute name unless an explicit
//! key is given:
//!
//! | Holder | Attribute | Key |
//! |--------|-----------|-----|
//! | `UrlKeys` | `ENDPOINT` | `url.endpoint` |
//! | `DatabasePoolKeys` | `MAX_SIZE` | `database_pool.max_size` |
//! | `UrlKeys` | `TIMEOUT = "http.timeout"` | `http.timeout` |
//!
//! The section is the holder name without its trailing `Keys`, converted to
//! snake case; the attribute is lower-cased.
//!
//! ```
//! use trellis_infrastructure::config_keys;
//!
//! config_keys! {
//!     /// Keys of the upstream URL section
//!     pub struct UrlKeys {
//!         ENDPOINT,
//!         TIMEOUT = "http.timeout",
//!     }
//! }
//!
//! assert_eq!(UrlKeys::ENDPOINT.key(), "url.endpoint");
//! assert_eq!(UrlKeys::TIMEOUT.key(), "http.timeout");
//! ```

use std::fmt;

use trellis_domain::constants::{CONFIG_HOLDER_SUFFIX, CONFIG_KEY_SEPARATOR};

/// One attribute of a config key holder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfigKey {
    holder: &'static str,
    attribute: &'static str,
    explicit: Option<&'static str>,
}

impl ConfigKey {
    /// Key derived from the holder and attribute names
    pub const fn derived(holder: &'static str, attribute: &'static str) -> Self {
        Self {
            holder,
            attribute,
            explicit: None,
        }
    }

    /// Key given verbatim
    pub const fn explicit(holder: &'static str, attribute: &'static str, key: &'static str) -> Self {
        Self {
            holder,
            attribute,
            explicit: Some(key),
        }
    }

    /// Declaring holder name
    pub fn holder(&self) -> &'static str {
        self.holder
    }

    /// Attribute name
    pub fn attribute(&self) -> &'static str {
        self.attribute
    }

    /// Lookup key in the config source
    pub fn key(&self) -> String {
        match self.explicit {
            Some(key) => key.to_string(),
            None => derive_key(self.holder, self.attribute),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Derive `section.attribute` from a holder and attribute name
pub fn derive_key(holder: &str, attribute: &str) -> String {
    format!(
        "{}{}{}",
        section_name(holder),
        CONFIG_KEY_SEPARATOR,
        attribute.to_ascii_lowercase()
    )
}

/// Section derived from a holder name: `UrlKeys` → `url`
pub fn section_name(holder: &str) -> String {
    let base = match holder.strip_suffix(CONFIG_HOLDER_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => holder,
    };
    to_snake_case(base)
}

fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_ascii_lowercase() || chars[i - 1].is_ascii_digit());
            let acronym_end = i > 0
                && chars[i - 1].is_ascii_uppercase()
                && chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev_lower || acronym_end {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Declare a config key holder
///
/// Each listed attribute becomes a [`ConfigKey`] associated constant. An
/// attribute written as `NAME = "some.key"` uses that key verbatim.
#[macro_export]
macro_rules! config_keys {
    (@key $holder:ident $attr:ident) => {
        $crate::config::ConfigKey::derived(stringify!($holder), stringify!($attr))
    };
    (@key $holder:ident $attr:ident $explicit:literal) => {
        $crate::config::ConfigKey::explicit(stringify!($holder), stringify!($attr), $explicit)
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $holder:ident {
            $( $(#[$attr_meta:meta])* $attr:ident $(= $explicit:literal)? ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $holder;

        #[allow(non_upper_case_globals)]
        impl $holder {
            $(
                $(#[$attr_meta])*
                pub const $attr: $crate::config::ConfigKey =
                    $crate::config_keys!(@key $holder $attr $($explicit)?);
            )*

            /// Every key declared by this holder
            pub const KEYS: &'static [$crate::config::ConfigKey] = &[$(Self::$attr),*];
        }
    };
}
