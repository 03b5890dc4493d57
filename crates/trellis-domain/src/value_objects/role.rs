//! Component roles

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared role of an injectable type
///
/// All roles are managed as process-lifetime singletons. Only
/// [`Role::Controller`] may declare routes or a path prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Business logic component
    Service,
    /// Component exposing HTTP routes
    Controller,
    /// Any other managed component
    Component,
}

impl Role {
    /// Whether this role may carry route declarations
    pub fn exposes_routes(self) -> bool {
        matches!(self, Self::Controller)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Service => "service",
            Self::Controller => "controller",
            Self::Component => "component",
        };
        f.write_str(name)
    }
}
