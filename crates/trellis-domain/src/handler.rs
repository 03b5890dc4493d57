//! Route handler types
//!
//! An [`Endpoint`] is the unit the route binder hands to an HTTP server:
//! the resolved verb and path, the names of the parameters filled from the
//! path and from the request body, and an invoker bound to the controller
//! singleton.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::value_objects::{PathTemplate, Verb};

/// Result returned by route handlers
pub type HandlerResult = std::result::Result<Value, HandlerError>;

/// Future returned by route handlers
pub type HandlerFuture = BoxFuture<'static, HandlerResult>;

/// Type-erased call into a controller method
pub type Invoker = Arc<dyn Fn(RouteArgs) -> HandlerFuture + Send + Sync>;

/// Failure reported by a route handler, mapped to an HTTP status
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct HandlerError {
    /// HTTP status code
    pub status: u16,
    /// Message returned to the client
    pub message: String,
}

impl HandlerError {
    /// Create an error with an explicit status
    pub fn new<S: Into<String>>(status: u16, message: S) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// `400 Bad Request`
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::new(400, message)
    }

    /// `404 Not Found`
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::new(404, message)
    }

    /// `500 Internal Server Error`
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::new(500, message)
    }
}

impl From<crate::error::Error> for HandlerError {
    fn from(err: crate::error::Error) -> Self {
        Self::internal(err.to_string())
    }
}

/// Value bound to a declared method parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Literal request path segment
    Path(String),
    /// Deserialized request body (`null` when the request had none)
    Body(Value),
}

/// Arguments for one handler invocation, keyed by parameter name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteArgs {
    values: HashMap<String, Argument>,
}

impl RouteArgs {
    /// Create an empty argument set
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a path segment value
    pub fn with_path(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), Argument::Path(value.into()));
        self
    }

    /// Bind a request body value
    pub fn with_body(mut self, name: impl Into<String>, value: Value) -> Self {
        self.values.insert(name.into(), Argument::Body(value));
        self
    }

    /// Raw argument by parameter name
    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.values.get(name)
    }

    /// Path segment bound to `name`, exactly as it appeared in the request
    pub fn path(&self, name: &str) -> Result<&str, HandlerError> {
        match self.values.get(name) {
            Some(Argument::Path(value)) => Ok(value),
            Some(Argument::Body(_)) => Err(HandlerError::internal(format!(
                "Parameter `{name}` is bound to the request body, not the path"
            ))),
            None => Err(HandlerError::internal(format!("Parameter `{name}` is not declared"))),
        }
    }

    /// Request body bound to `name`, deserialized into `T`
    pub fn body<T: DeserializeOwned>(&self, name: &str) -> Result<T, HandlerError> {
        match self.values.get(name) {
            Some(Argument::Body(value)) => serde_json::from_value(value.clone())
                .map_err(|e| HandlerError::bad_request(format!("Invalid body for `{name}`: {e}"))),
            Some(Argument::Path(_)) => Err(HandlerError::internal(format!(
                "Parameter `{name}` is bound to the path, not the request body"
            ))),
            None => Err(HandlerError::internal(format!("Parameter `{name}` is not declared"))),
        }
    }

    /// Number of bound parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no parameter is bound
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A controller method bound to a verb and a full path
#[derive(Clone)]
pub struct Endpoint {
    /// Owning component name
    pub component: String,
    /// Method name
    pub method: String,
    /// HTTP verb
    pub verb: Verb,
    /// Full path (controller prefix + method path)
    pub path: PathTemplate,
    /// Parameters filled from path placeholders
    pub path_params: Vec<String>,
    /// Parameters filled from the request body
    pub body_params: Vec<String>,
    invoker: Invoker,
}

impl Endpoint {
    /// Create an endpoint
    pub fn new(
        component: impl Into<String>,
        method: impl Into<String>,
        verb: Verb,
        path: PathTemplate,
        path_params: Vec<String>,
        body_params: Vec<String>,
        invoker: Invoker,
    ) -> Self {
        Self {
            component: component.into(),
            method: method.into(),
            verb,
            path,
            path_params,
            body_params,
            invoker,
        }
    }

    /// `Component::method`, used in logs and error messages
    pub fn handler_name(&self) -> String {
        format!("{}::{}", self.component, self.method)
    }

    /// Whether the server must read the request body for this endpoint
    pub fn needs_body(&self) -> bool {
        !self.body_params.is_empty()
    }

    /// Call the bound method
    ///
    /// `path_values` holds the captured placeholder segments; `body` the
    /// deserialized request body, handed to every body parameter.
    pub fn invoke(
        &self,
        mut path_values: HashMap<String, String>,
        body: Option<Value>,
    ) -> HandlerFuture {
        let mut args = RouteArgs::new();
        for name in &self.path_params {
            match path_values.remove(name) {
                Some(value) => args = args.with_path(name.as_str(), value),
                None => {
                    let err = HandlerError::bad_request(format!("Missing path segment `{name}`"));
                    return future::ready(Err(err)).boxed();
                }
            }
        }
        let body = body.unwrap_or(Value::Null);
        for name in &self.body_params {
            args = args.with_body(name.as_str(), body.clone());
        }
        (self.invoker)(args)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("handler", &self.handler_name())
            .field("verb", &self.verb)
            .field("path", &self.path.to_string())
            .field("path_params", &self.path_params)
            .field("body_params", &self.body_params)
            .finish()
    }
}
