//! HTTP Transport over Rocket
//!
//! [`RocketServer`] implements the container's `HttpServer` port. Each
//! registered endpoint becomes a `rocket::Route` whose handler extracts the
//! path placeholders and the JSON body, then invokes the bound method.
//!
//! | Request condition | Response |
//! |-------------------|----------|
//! | handler returns a value | `200` with the value as JSON |
//! | handler returns `HandlerError` | its status, `{"error": message}` |
//! | body is not valid JSON | `400` |
//! | body exceeds `server.body_limit` | `413` |
//!
//! Bodies are only read for endpoints with body parameters. An empty body
//! is passed as `null`.
//!
//! Every route gets its own rank: templates with more literal segments are
//! tried first, and equal ones keep registration order. Overlapping
//! templates such as `a/<x>/c` and `a/b/<y>` therefore never collide when
//! Rocket ignites.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use rocket::data::{Data, ToByteUnit};
use rocket::http::{Method, Status};
use rocket::route::{Handler, Outcome, Route};
use rocket::serde::json::Json;
use rocket::{catch, catchers, Build, Request, Rocket};
use serde_json::{json, Value};
use tracing::{debug, warn};
use trellis_domain::{Endpoint, Error, HandlerError, HttpServer, PathTemplate, Result, Verb};
use trellis_infrastructure::config::ServerConfig;

/// Rank distance between templates with different literal counts
const RANK_SPAN: isize = 1 << 20;

/// Route table shared between the container and Rocket
#[derive(Clone)]
pub struct RocketServer {
    config: ServerConfig,
    routes: Arc<RwLock<Vec<Route>>>,
}

impl RocketServer {
    /// Create an empty route table
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            routes: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Snapshot of the registered routes
    pub fn routes(&self) -> Result<Vec<Route>> {
        self.routes
            .read()
            .map(|routes| routes.clone())
            .map_err(|_| Error::server("Route table lock poisoned"))
    }

    /// Build the Rocket application with every registered route mounted at `/`
    pub fn rocket(&self) -> Result<Rocket<Build>> {
        let figment = rocket::Config::figment()
            .merge(("address", self.config.address.clone()))
            .merge(("port", self.config.port));

        Ok(rocket::custom(figment)
            .mount("/", self.routes()?)
            .register("/", catchers![json_catcher]))
    }
}

impl HttpServer for RocketServer {
    fn name(&self) -> &str {
        "rocket"
    }

    fn register(&self, endpoint: Endpoint) -> Result<()> {
        let uri = endpoint.path.to_string();
        let name = endpoint.handler_name();
        let mut routes = self
            .routes
            .write()
            .map_err(|_| Error::server("Route table lock poisoned"))?;

        let rank = route_rank(&endpoint.path, routes.len());
        let mut route = Route::ranked(
            rank,
            method_for(endpoint.verb),
            &uri,
            EndpointHandler {
                endpoint: Arc::new(endpoint),
                body_limit: self.config.body_limit,
            },
        );
        route.name = Some(name.clone().into());
        routes.push(route);
        debug!(uri = %uri, handler = %name, rank, "Rocket route registered");
        Ok(())
    }
}

fn route_rank(path: &PathTemplate, index: usize) -> isize {
    let literals = isize::try_from(path.literal_count()).unwrap_or(isize::MAX);
    let index = isize::try_from(index).unwrap_or(RANK_SPAN - 1);
    index.saturating_sub(literals.saturating_mul(RANK_SPAN))
}

fn method_for(verb: Verb) -> Method {
    match verb {
        Verb::Get => Method::Get,
        Verb::Post => Method::Post,
        Verb::Put => Method::Put,
        Verb::Delete => Method::Delete,
    }
}

#[derive(Clone)]
struct EndpointHandler {
    endpoint: Arc<Endpoint>,
    body_limit: u64,
}

#[rocket::async_trait]
impl Handler for EndpointHandler {
    async fn handle<'r>(&self, req: &'r Request<'_>, data: Data<'r>) -> Outcome<'r> {
        let mut path_values = HashMap::new();
        for (index, name) in self.endpoint.path.params() {
            match req.routed_segment(index) {
                Some(value) => {
                    path_values.insert(name.to_string(), value.to_string());
                }
                None => return Outcome::forward(data, Status::NotFound),
            }
        }

        let body = if self.endpoint.needs_body() {
            match read_json(data, self.body_limit).await {
                Ok(body) => body,
                Err(err) => return error_outcome(req, err),
            }
        } else {
            None
        };

        match self.endpoint.invoke(path_values, body).await {
            Ok(value) => Outcome::from(req, Json(value)),
            Err(err) => {
                if err.status >= 500 {
                    warn!(handler = %self.endpoint.handler_name(), error = %err, "Handler failed");
                }
                error_outcome(req, err)
            }
        }
    }
}

async fn read_json(data: Data<'_>, limit: u64) -> std::result::Result<Option<Value>, HandlerError> {
    let raw = data
        .open(limit.bytes())
        .into_string()
        .await
        .map_err(|err| HandlerError::bad_request(format!("Failed to read request body: {err}")))?;
    if !raw.is_complete() {
        return Err(HandlerError::new(
            Status::PayloadTooLarge.code,
            format!("Request body exceeds {limit} bytes"),
        ));
    }

    let raw = raw.into_inner();
    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|err| HandlerError::bad_request(format!("Malformed JSON body: {err}")))
}

fn error_outcome<'r>(req: &'r Request<'_>, err: HandlerError) -> Outcome<'r> {
    let status = Status::from_code(err.status).unwrap_or(Status::InternalServerError);
    Outcome::from(req, (status, Json(json!({ "error": err.message }))))
}

#[catch(default)]
fn json_catcher(status: Status, _req: &Request<'_>) -> (Status, Json<Value>) {
    let message = status.reason().unwrap_or("Unknown error");
    (status, Json(json!({ "error": message })))
}
