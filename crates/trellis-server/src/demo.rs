//! Demo application
//!
//! A greeting service and the controller exposing it. Both register
//! themselves for scanning under [`MODULE_ROOT`], which the binary scans
//! when no module roots are configured.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /api/v1/hello` | `GreetingController::hello` |
//! | `GET /api/v1/user/<user_id>` | `GreetingController::user` |
//! | `POST /api/v1/greet` | `GreetingController::greet` |

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use trellis_domain::{BoxError, HandlerError, Role};
use trellis_infrastructure::config::ConfigReader;
use trellis_infrastructure::di::{Dependency, Injectable, Injector, Routes};
use trellis_infrastructure::{config_keys, register_component};

/// Module scanned by default
pub const MODULE_ROOT: &str = module_path!();

/// Greeting used when `greeting.message` is not configured
pub const DEFAULT_GREETING: &str = "Hello";

config_keys! {
    /// Keys of the `[greeting]` section
    pub struct GreetingKeys {
        /// Greeting word, `greeting.message`
        MESSAGE,
    }
}

/// Builds greetings from configuration
pub struct GreetingService {
    config: Arc<ConfigReader>,
}

impl GreetingService {
    /// Greeting for `name`
    ///
    /// The message is read on every call, so configuration changes apply
    /// without a restart.
    pub fn greet(&self, name: &str) -> String {
        let message = self.config.read_or(&GreetingKeys::MESSAGE, DEFAULT_GREETING);
        format!("{message}, {name}!")
    }
}

impl Injectable for GreetingService {
    const ROLE: Role = Role::Service;

    fn dependencies() -> Vec<Dependency> {
        vec![Dependency::on::<ConfigReader>("config")]
    }

    fn construct(injector: &Injector<'_>) -> Result<Self, BoxError> {
        Ok(Self {
            config: injector.get()?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct GreetRequest {
    name: String,
}

/// HTTP surface of [`GreetingService`]
pub struct GreetingController {
    greetings: Arc<GreetingService>,
}

impl Injectable for GreetingController {
    const ROLE: Role = Role::Controller;
    const PREFIX: Option<&'static str> = Some("/api/v1");

    fn dependencies() -> Vec<Dependency> {
        vec![Dependency::on::<GreetingService>("greetings")]
    }

    fn construct(injector: &Injector<'_>) -> Result<Self, BoxError> {
        Ok(Self {
            greetings: injector.get()?,
        })
    }

    fn routes(routes: &mut Routes<Self>) {
        routes.get("hello").to("hello", |this, _args| async move {
            Ok(json!({ "message": this.greetings.greet("world") }))
        });
        routes
            .get("user/<user_id>")
            .params(["user_id"])
            .to("user", |_this, args| async move {
                let user_id = args.path("user_id")?;
                Ok(json!(user_id))
            });
        routes
            .post("greet")
            .params(["request"])
            .to("greet", |this, args| async move {
                let request: GreetRequest = args.body("request")?;
                if request.name.trim().is_empty() {
                    return Err(HandlerError::bad_request("name cannot be empty"));
                }
                Ok(json!({ "message": this.greetings.greet(&request.name) }))
            });
    }
}

register_component!(GREETING_SERVICE, GreetingService);
register_component!(GREETING_CONTROLLER, GreetingController);
