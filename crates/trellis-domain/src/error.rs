//! Error handling types
//!
//! Every bootstrap failure (discovery through route binding) aborts
//! `Container::start`. `ConfigKeyNotFound` is the only variant raised after
//! startup, when a component reads a configuration key lazily.

use thiserror::Error;

/// Boxed error returned by component constructors and external collaborators
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Trellis container
#[derive(Error, Debug)]
pub enum Error {
    /// Duplicate or misplaced declarations found while scanning the catalog
    #[error("Discovery error: {message}")]
    Discovery {
        /// Description of the offending declaration
        message: String,
    },

    /// A constructor parameter matches neither a catalog entry nor an external provider
    #[error(
        "Unresolved dependency: {component} needs parameter `{parameter}` of type {type_name}, \
         but no component or external provider supplies it"
    )]
    UnresolvedDependency {
        /// Component declaring the parameter
        component: String,
        /// Parameter name
        parameter: String,
        /// Declared parameter type
        type_name: String,
    },

    /// The dependency graph contains a cycle
    #[error("Cyclic dependency detected: {}", .cycle.join(" -> "))]
    CyclicDependency {
        /// Members of the cycle in traversal order, first member repeated last
        cycle: Vec<String>,
    },

    /// A component constructor failed
    #[error("Failed to instantiate {component}: {source}")]
    Instantiation {
        /// Component whose constructor failed
        component: String,
        /// Underlying constructor failure
        #[source]
        source: BoxError,
    },

    /// Two routes claim the same verb and path
    #[error("Route conflict: {verb} {path} is declared by both {first} and {second}")]
    RouteConflict {
        /// HTTP verb
        verb: String,
        /// Resolved path
        path: String,
        /// Handler registered first (`Component::method`)
        first: String,
        /// Handler that collided with it
        second: String,
    },

    /// A configuration key is absent from the config source
    #[error("Config key not found: {key}")]
    ConfigKeyNotFound {
        /// The derived or explicit lookup key
        key: String,
    },

    /// Container lifecycle misuse (e.g. starting twice)
    #[error("Lifecycle error: {message}")]
    Lifecycle {
        /// Description of the invalid transition
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Error reported by the HTTP server collaborator
    #[error("Server error: {message}")]
    Server {
        /// Description of the server error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },
}

// Bootstrap error creation methods
impl Error {
    /// Create a discovery error
    pub fn discovery<S: Into<String>>(message: S) -> Self {
        Self::Discovery {
            message: message.into(),
        }
    }

    /// Create an unresolved dependency error
    pub fn unresolved<C, P, T>(component: C, parameter: P, type_name: T) -> Self
    where
        C: Into<String>,
        P: Into<String>,
        T: Into<String>,
    {
        Self::UnresolvedDependency {
            component: component.into(),
            parameter: parameter.into(),
            type_name: type_name.into(),
        }
    }

    /// Create a cyclic dependency error
    pub fn cyclic(cycle: Vec<String>) -> Self {
        Self::CyclicDependency { cycle }
    }

    /// Wrap a constructor failure
    pub fn instantiation<S: Into<String>>(component: S, source: BoxError) -> Self {
        Self::Instantiation {
            component: component.into(),
            source,
        }
    }

    /// Create a route conflict error
    pub fn route_conflict<V, P, F, S>(verb: V, path: P, first: F, second: S) -> Self
    where
        V: ToString,
        P: Into<String>,
        F: Into<String>,
        S: Into<String>,
    {
        Self::RouteConflict {
            verb: verb.to_string(),
            path: path.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Create a lifecycle error
    pub fn lifecycle<S: Into<String>>(message: S) -> Self {
        Self::Lifecycle {
            message: message.into(),
        }
    }
}

// Runtime error creation methods
impl Error {
    /// Create a config key not found error
    pub fn config_key_not_found<S: Into<String>>(key: S) -> Self {
        Self::ConfigKeyNotFound { key: key.into() }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a server error
    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Server {
            message: message.into(),
            source: None,
        }
    }

    /// Create a server error with source
    pub fn server_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Server {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Classification helpers
impl Error {
    /// True for errors raised during `Container::start`
    pub fn is_bootstrap(&self) -> bool {
        matches!(
            self,
            Self::Discovery { .. }
                | Self::UnresolvedDependency { .. }
                | Self::CyclicDependency { .. }
                | Self::Instantiation { .. }
                | Self::RouteConflict { .. }
                | Self::Lifecycle { .. }
        )
    }
}
