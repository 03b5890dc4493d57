//! Route Binder
//!
//! Turns every route declared on a controller singleton into an
//! [`Endpoint`] and registers it on the appended HTTP servers.
//!
//! ```text
//! ObjectGraph::controllers()
//!        │  prefix + method path, path params vs body params
//!        ▼
//!   Vec<Endpoint> ──► conflict check (verb, path) ──► HttpServer::register
//! ```
//!
//! Conflicts are checked across all controllers before the first
//! registration, so a failing bind registers nothing.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};
use trellis_domain::{Endpoint, Error, HttpServer, Invoker, PathTemplate, Result, RouteArgs, Verb};

use crate::di::graph::ObjectGraph;

/// A registered (verb, path) pair and the method serving it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundRoute {
    /// HTTP verb
    pub verb: Verb,
    /// Full path template
    pub path: String,
    /// `Component::method`
    pub handler: String,
}

/// Build the endpoints of every controller in the graph
///
/// Fails with [`Error::RouteConflict`] when two methods resolve to the same
/// verb and path.
pub fn endpoints(graph: &ObjectGraph) -> Result<Vec<Endpoint>> {
    let mut endpoints = Vec::new();
    let mut claimed: HashMap<(Verb, String), String> = HashMap::new();

    for managed in graph.controllers() {
        let descriptor = managed.descriptor();
        let prefix = descriptor.prefix_template()?;

        for route in descriptor.routes() {
            let path = PathTemplate::join(&prefix, &route.template()?);
            let key = (route.verb, path.conflict_key());
            if let Some(first) = claimed.get(&key) {
                return Err(Error::route_conflict(
                    route.verb,
                    path.to_string(),
                    first.clone(),
                    route.handler_name(),
                ));
            }
            claimed.insert(key, route.handler_name());

            let (path_params, body_params): (Vec<String>, Vec<String>) = route
                .params
                .iter()
                .cloned()
                .partition(|param| path.has_param(param));

            let instance = managed.instance();
            let handler = route.handler.clone();
            let invoker: Invoker =
                Arc::new(move |args: RouteArgs| handler(instance.clone(), args));

            endpoints.push(Endpoint::new(
                descriptor.name(),
                route.method.clone(),
                route.verb,
                path,
                path_params,
                body_params,
                invoker,
            ));
        }
    }
    Ok(endpoints)
}

/// Register every controller route on every server
pub fn bind(graph: &ObjectGraph, servers: &[Arc<dyn HttpServer>]) -> Result<Vec<BoundRoute>> {
    let endpoints = endpoints(graph)?;
    if servers.is_empty() && !endpoints.is_empty() {
        warn!(
            routes = endpoints.len(),
            "No HTTP server appended; routes are validated but not registered"
        );
    }

    let mut bound = Vec::with_capacity(endpoints.len());
    for endpoint in endpoints {
        for server in servers {
            server.register(endpoint.clone())?;
        }
        info!(
            verb = %endpoint.verb,
            path = %endpoint.path,
            handler = %endpoint.handler_name(),
            servers = servers.len(),
            "Route bound"
        );
        bound.push(BoundRoute {
            verb: endpoint.verb,
            path: endpoint.path.to_string(),
            handler: endpoint.handler_name(),
        });
    }
    Ok(bound)
}
