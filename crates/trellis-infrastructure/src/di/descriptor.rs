//! Component and route descriptors
//!
//! Descriptors are produced once, at scan time, from [`Injectable`]
//! implementations and never change afterwards.

use std::any::TypeId;
use std::fmt;

use trellis_domain::{BoxError, PathTemplate, Result, Role, Verb};

use super::component::{construct_erased, Dependency, ErasedHandler, Injectable, Instance, Routes};
use super::graph::Injector;

/// Erased constructor of a component
pub type Factory = fn(&Injector<'_>) -> std::result::Result<Instance, BoxError>;

/// Metadata of one injectable type
#[derive(Clone)]
pub struct ComponentDescriptor {
    name: &'static str,
    type_id: TypeId,
    role: Role,
    prefix: Option<&'static str>,
    dependencies: Vec<Dependency>,
    routes: Vec<MethodRouteDescriptor>,
    factory: Factory,
}

impl ComponentDescriptor {
    /// Describe an [`Injectable`] type
    pub fn of<T: Injectable>() -> Self {
        let name = std::any::type_name::<T>();
        let mut routes = Routes::<T>::new();
        T::routes(&mut routes);
        let routes = routes
            .into_decls()
            .into_iter()
            .map(|decl| MethodRouteDescriptor {
                component: name,
                method: decl.method,
                verb: decl.verb,
                path: decl.path,
                params: decl.params,
                handler: decl.handler,
            })
            .collect();

        Self {
            name,
            type_id: TypeId::of::<T>(),
            role: T::ROLE,
            prefix: T::PREFIX,
            dependencies: T::dependencies(),
            routes,
            factory: construct_erased::<T>,
        }
    }

    /// Fully-qualified type name, the component's identity
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type identity used for dependency matching
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Declared role
    pub fn role(&self) -> Role {
        self.role
    }

    /// Module path the type is defined in
    ///
    /// Derived from the type name: `app::users::UserService` lives in
    /// `app::users`. Generic arguments are ignored.
    pub fn module(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit_once("::").map_or("", |(module, _)| module)
    }

    /// Short type name without the module path
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit_once("::").map_or(base, |(_, short)| short)
    }

    /// Raw controller path prefix
    pub fn prefix(&self) -> Option<&'static str> {
        self.prefix
    }

    /// Parsed controller path prefix (empty when none is declared)
    pub fn prefix_template(&self) -> Result<PathTemplate> {
        PathTemplate::parse(self.prefix.unwrap_or(""))
    }

    /// Constructor parameters in declaration order
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Route declarations (empty for non-controllers)
    pub fn routes(&self) -> &[MethodRouteDescriptor] {
        &self.routes
    }

    pub(crate) fn factory(&self) -> Factory {
        self.factory
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("prefix", &self.prefix)
            .field(
                "dependencies",
                &self
                    .dependencies
                    .iter()
                    .map(|d| d.parameter)
                    .collect::<Vec<_>>(),
            )
            .field("routes", &self.routes)
            .finish()
    }
}

/// A controller method bound to a verb and path template
#[derive(Clone)]
pub struct MethodRouteDescriptor {
    /// Owning component name
    pub component: &'static str,
    /// Method name
    pub method: String,
    /// HTTP verb
    pub verb: Verb,
    /// Raw method path template (without the controller prefix)
    pub path: String,
    /// Declared parameter names
    pub params: Vec<String>,
    pub(crate) handler: ErasedHandler,
}

impl MethodRouteDescriptor {
    /// Parsed method path template
    pub fn template(&self) -> Result<PathTemplate> {
        PathTemplate::parse(&self.path)
    }

    /// `Component::method`
    pub fn handler_name(&self) -> String {
        format!("{}::{}", self.component, self.method)
    }
}

impl fmt::Debug for MethodRouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodRouteDescriptor")
            .field("method", &self.method)
            .field("verb", &self.verb)
            .field("path", &self.path)
            .field("params", &self.params)
            .finish()
    }
}
