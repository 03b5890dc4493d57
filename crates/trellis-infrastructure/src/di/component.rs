//! Declaration surface for managed components
//!
//! A type becomes injectable by implementing [`Injectable`]: it names its
//! role, declares its constructor parameters as typed [`Dependency`] values,
//! and builds itself from an [`Injector`] that hands out exactly those
//! dependencies. Controllers additionally declare their routes.
//!
//! ```ignore
//! struct UserController {
//!     users: Arc<UserService>,
//! }
//!
//! impl Injectable for UserController {
//!     const ROLE: Role = Role::Controller;
//!     const PREFIX: Option<&'static str> = Some("/api/v1");
//!
//!     fn dependencies() -> Vec<Dependency> {
//!         vec![Dependency::on::<UserService>("users")]
//!     }
//!
//!     fn construct(injector: &Injector<'_>) -> Result<Self, BoxError> {
//!         Ok(Self { users: injector.get()? })
//!     }
//!
//!     fn routes(routes: &mut Routes<Self>) {
//!         routes
//!             .get("user/<user_id>")
//!             .params(["user_id"])
//!             .to("find_user", |this, args| async move {
//!                 this.users.find(args.path("user_id")?)
//!             });
//!     }
//! }
//! ```

use std::any::{Any, TypeId};
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use futures::future::{self, FutureExt};
use trellis_domain::{
    BoxError, HandlerError, HandlerFuture, HandlerResult, Role, RouteArgs, Verb,
};

use super::graph::Injector;

/// Shared, type-erased component instance
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Type-erased route handler taking the controller instance
pub type ErasedHandler = Arc<dyn Fn(Instance, RouteArgs) -> HandlerFuture + Send + Sync>;

/// A type managed by the container as a process-lifetime singleton
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Declared role
    const ROLE: Role;

    /// Path prefix applied to every route (controllers only)
    const PREFIX: Option<&'static str> = None;

    /// Constructor parameters, in declaration order
    fn dependencies() -> Vec<Dependency> {
        Vec::new()
    }

    /// Build the instance from its declared dependencies
    fn construct(injector: &Injector<'_>) -> Result<Self, BoxError>;

    /// Route declarations (controllers only)
    fn routes(_routes: &mut Routes<Self>) {}
}

/// A typed constructor parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency {
    /// Parameter name, used in error messages
    pub parameter: &'static str,
    /// Identity of the requested type
    pub type_id: TypeId,
    /// Fully-qualified name of the requested type
    pub type_name: &'static str,
}

impl Dependency {
    /// Declare a parameter of type `T`
    pub fn on<T: Send + Sync + 'static>(parameter: &'static str) -> Self {
        Self {
            parameter,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }
}

/// One route declared on a controller method, with its handler erased
#[derive(Clone)]
pub struct RouteDecl {
    /// HTTP verb
    pub verb: Verb,
    /// Raw method path template
    pub path: String,
    /// Declared parameter names
    pub params: Vec<String>,
    /// Method name
    pub method: String,
    /// Handler taking the controller instance
    pub handler: ErasedHandler,
}

/// Collector passed to [`Injectable::routes`]
pub struct Routes<T> {
    decls: Vec<RouteDecl>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Injectable> Routes<T> {
    pub(crate) fn new() -> Self {
        Self {
            decls: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Declare a route with an explicit verb
    pub fn route(&mut self, verb: Verb, path: impl Into<String>) -> RouteBuilder<'_, T> {
        RouteBuilder {
            routes: self,
            verb,
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Declare a `GET` route
    pub fn get(&mut self, path: impl Into<String>) -> RouteBuilder<'_, T> {
        self.route(Verb::Get, path)
    }

    /// Declare a `POST` route
    pub fn post(&mut self, path: impl Into<String>) -> RouteBuilder<'_, T> {
        self.route(Verb::Post, path)
    }

    /// Declare a `PUT` route
    pub fn put(&mut self, path: impl Into<String>) -> RouteBuilder<'_, T> {
        self.route(Verb::Put, path)
    }

    /// Declare a `DELETE` route
    pub fn delete(&mut self, path: impl Into<String>) -> RouteBuilder<'_, T> {
        self.route(Verb::Delete, path)
    }

    pub(crate) fn into_decls(self) -> Vec<RouteDecl> {
        self.decls
    }
}

/// Route declaration in progress
pub struct RouteBuilder<'a, T> {
    routes: &'a mut Routes<T>,
    verb: Verb,
    path: String,
    params: Vec<String>,
}

impl<T: Injectable> RouteBuilder<'_, T> {
    /// Declared method parameters
    ///
    /// Names matching a `<placeholder>` in the path receive that segment;
    /// every other name receives the deserialized request body.
    pub fn params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.extend(names.into_iter().map(Into::into));
        self
    }

    /// Bind the route to a method of the controller
    pub fn to<F, Fut>(self, method: impl Into<String>, handler: F)
    where
        F: Fn(Arc<T>, RouteArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        let method = method.into();
        let owner = std::any::type_name::<T>();
        let erased: ErasedHandler =
            Arc::new(move |instance: Instance, args: RouteArgs| match instance.downcast::<T>() {
                Ok(this) => handler(this, args).boxed(),
                Err(_) => future::ready(Err(HandlerError::internal(format!(
                    "Route handler bound to an instance that is not {owner}"
                ))))
                .boxed(),
            });
        self.routes.decls.push(RouteDecl {
            verb: self.verb,
            path: self.path,
            params: self.params,
            method,
            handler: erased,
        });
    }
}

/// Type-erased constructor stored in descriptors
pub(crate) fn construct_erased<T: Injectable>(
    injector: &Injector<'_>,
) -> Result<Instance, BoxError> {
    let instance: Instance = Arc::new(T::construct(injector)?);
    Ok(instance)
}
