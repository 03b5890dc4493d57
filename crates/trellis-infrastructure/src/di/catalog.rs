//! Component Catalog
//!
//! The set of injectable types discovered before anything is instantiated.
//!
//! ```text
//! linkme (compile-time)        Catalog (scan-time)
//! ─────────────────────        ───────────────────
//! COMPONENTS slice      →      filter by module roots
//! Container::register   →      append in call order
//!                                     ↓
//!                              validate declarations
//! ```

use std::any::TypeId;
use std::collections::{HashMap, HashSet};

use tracing::{debug, info};
use trellis_domain::{Error, Result};

use super::descriptor::{ComponentDescriptor, MethodRouteDescriptor};
use super::registry::{module_matches, registered_components};

/// Validated set of component descriptors in discovery order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    descriptors: Vec<ComponentDescriptor>,
}

impl Catalog {
    /// Discover registered components below the given module roots
    pub fn scan<S: AsRef<str>>(module_roots: &[S]) -> Result<Self> {
        Self::scan_with(module_roots, Vec::new())
    }

    /// Discover registered components and append explicit registrations
    pub fn scan_with<S: AsRef<str>>(
        module_roots: &[S],
        explicit: Vec<ComponentDescriptor>,
    ) -> Result<Self> {
        let mut descriptors: Vec<ComponentDescriptor> = registered_components()
            .into_iter()
            .filter(|descriptor| {
                module_roots
                    .iter()
                    .any(|root| module_matches(descriptor.module(), root.as_ref()))
            })
            .collect();
        let discovered = descriptors.len();
        descriptors.extend(explicit);

        let catalog = Self::from_descriptors(descriptors)?;
        info!(
            discovered,
            explicit = catalog.len() - discovered,
            "Component catalog scanned"
        );
        Ok(catalog)
    }

    /// Build a catalog from descriptors, validating every declaration
    pub fn from_descriptors(descriptors: Vec<ComponentDescriptor>) -> Result<Self> {
        let mut names = HashSet::new();
        let mut types = HashSet::new();
        for descriptor in &descriptors {
            if !names.insert(descriptor.name()) || !types.insert(descriptor.type_id()) {
                return Err(Error::discovery(format!(
                    "Component {} is registered more than once",
                    descriptor.name()
                )));
            }
            validate_descriptor(descriptor)?;
            debug!(
                component = descriptor.name(),
                role = %descriptor.role(),
                dependencies = descriptor.dependencies().len(),
                routes = descriptor.routes().len(),
                "Component discovered"
            );
        }
        Ok(Self { descriptors })
    }

    /// Descriptors in discovery order
    pub fn descriptors(&self) -> &[ComponentDescriptor] {
        &self.descriptors
    }

    /// Look up a descriptor by fully-qualified name
    pub fn get(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.descriptors.iter().find(|d| d.name() == name)
    }

    /// Discovery index of every type
    pub fn type_index(&self) -> HashMap<TypeId, usize> {
        self.descriptors
            .iter()
            .enumerate()
            .map(|(index, descriptor)| (descriptor.type_id(), index))
            .collect()
    }

    /// Number of descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// True when nothing was discovered
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub(crate) fn into_descriptors(self) -> Vec<ComponentDescriptor> {
        self.descriptors
    }
}

fn validate_descriptor(descriptor: &ComponentDescriptor) -> Result<()> {
    let name = descriptor.name();

    let mut parameters = HashSet::new();
    for dependency in descriptor.dependencies() {
        if !parameters.insert(dependency.parameter) {
            return Err(Error::discovery(format!(
                "{name} declares constructor parameter `{}` twice",
                dependency.parameter
            )));
        }
    }

    if !descriptor.role().exposes_routes() {
        if !descriptor.routes().is_empty() {
            return Err(Error::discovery(format!(
                "{name} declares routes but is a {}, not a controller",
                descriptor.role()
            )));
        }
        if descriptor.prefix().is_some() {
            return Err(Error::discovery(format!(
                "{name} declares a path prefix but is a {}, not a controller",
                descriptor.role()
            )));
        }
        return Ok(());
    }

    let prefix = descriptor.prefix_template()?;
    if let Some((_, param)) = prefix.params().next() {
        return Err(Error::discovery(format!(
            "{name} has placeholder <{param}> in its path prefix; placeholders belong on methods"
        )));
    }
    for route in descriptor.routes() {
        validate_route(route)?;
    }
    Ok(())
}

fn validate_route(route: &MethodRouteDescriptor) -> Result<()> {
    let handler = route.handler_name();
    if route.method.is_empty() {
        return Err(Error::discovery(format!(
            "{} has a route without a method name",
            route.component
        )));
    }

    let template = route.template()?;

    let mut declared = HashSet::new();
    for param in &route.params {
        if !declared.insert(param.as_str()) {
            return Err(Error::discovery(format!(
                "{handler} declares parameter `{param}` twice"
            )));
        }
    }
    for (_, placeholder) in template.params() {
        if !declared.contains(placeholder) {
            return Err(Error::discovery(format!(
                "{handler} has placeholder <{placeholder}> in '{}' without a matching parameter",
                route.path
            )));
        }
    }
    Ok(())
}
