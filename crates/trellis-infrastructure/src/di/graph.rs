//! Object Graph Builder
//!
//! Instantiates resolved descriptors in order, injecting previously built
//! singletons and external providers into each constructor.
//!
//! The graph owns every instance; dependents hold shared `Arc` handles to
//! the same allocation, so each type has exactly one instance.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info};
use trellis_domain::{Error, Result, Role};

use super::component::{Dependency, Instance};
use super::descriptor::ComponentDescriptor;

/// Instances supplied from outside the catalog
///
/// This is the closed list of external dependency types: a constructor
/// parameter matching no catalog entry resolves only if its type was
/// explicitly provided here.
#[derive(Clone, Default)]
pub struct ExternalProviders {
    providers: HashMap<TypeId, ExternalProvider>,
}

#[derive(Clone)]
struct ExternalProvider {
    type_name: &'static str,
    instance: Instance,
}

impl ExternalProviders {
    /// Create an empty provider list
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply an instance of `T`, replacing any previous one
    pub fn insert<T: Send + Sync + 'static>(&mut self, instance: Arc<T>) {
        self.providers.insert(
            TypeId::of::<T>(),
            ExternalProvider {
                type_name: std::any::type_name::<T>(),
                instance,
            },
        );
    }

    /// Whether a provider for the type exists
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.providers.contains_key(&type_id)
    }

    /// Provided instance of `T`
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.get_erased(TypeId::of::<T>())
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// Names of the provided types
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.providers.values().map(|p| p.type_name).collect();
        names.sort_unstable();
        names
    }

    /// Number of providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// True when nothing is provided
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    fn get_erased(&self, type_id: TypeId) -> Option<Instance> {
        self.providers.get(&type_id).map(|p| p.instance.clone())
    }
}

impl fmt::Debug for ExternalProviders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.type_names()).finish()
    }
}

/// Dependency lookup handed to a component constructor
///
/// Only the dependencies the component declared are reachable.
pub struct Injector<'a> {
    component: &'static str,
    declared: &'a [Dependency],
    graph: &'a ObjectGraph,
    externals: &'a ExternalProviders,
}

impl Injector<'_> {
    /// Name of the component being constructed
    pub fn component(&self) -> &'static str {
        self.component
    }

    /// Shared instance of a declared dependency
    pub fn get<T: Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();
        let dependency = self
            .declared
            .iter()
            .find(|d| d.type_id == type_id)
            .ok_or_else(|| Error::unresolved(self.component, "<undeclared>", type_name))?;

        let instance = self
            .graph
            .get_erased(type_id)
            .or_else(|| self.externals.get_erased(type_id))
            .ok_or_else(|| Error::unresolved(self.component, dependency.parameter, type_name))?;

        instance
            .downcast::<T>()
            .map_err(|_| Error::unresolved(self.component, dependency.parameter, type_name))
    }
}

/// A constructed singleton with its descriptor
#[derive(Clone)]
pub struct ManagedInstance {
    descriptor: ComponentDescriptor,
    instance: Instance,
}

impl ManagedInstance {
    /// Descriptor the instance was built from
    pub fn descriptor(&self) -> &ComponentDescriptor {
        &self.descriptor
    }

    /// Shared handle to the instance
    pub fn instance(&self) -> Instance {
        self.instance.clone()
    }
}

/// Fully built, read-only set of singletons
///
/// Constructed once by [`ObjectGraph::build`]; no method mutates it afterwards.
#[derive(Default)]
pub struct ObjectGraph {
    entries: Vec<ManagedInstance>,
    by_type: HashMap<TypeId, usize>,
}

impl ObjectGraph {
    /// Instantiate descriptors in resolver order
    ///
    /// A constructor failure aborts the build with [`Error::Instantiation`].
    pub fn build(ordered: Vec<ComponentDescriptor>, externals: &ExternalProviders) -> Result<Self> {
        let mut graph = Self::default();
        for descriptor in ordered {
            let injector = Injector {
                component: descriptor.name(),
                declared: descriptor.dependencies(),
                graph: &graph,
                externals,
            };
            let instance = match (descriptor.factory())(&injector) {
                Ok(instance) => instance,
                Err(source) => {
                    error!(component = descriptor.name(), error = %source, "Constructor failed");
                    return Err(Error::instantiation(descriptor.name(), source));
                }
            };
            debug!(component = descriptor.name(), role = %descriptor.role(), "Component instantiated");
            graph.insert(descriptor, instance);
        }
        info!(components = graph.len(), "Object graph built");
        Ok(graph)
    }

    fn insert(&mut self, descriptor: ComponentDescriptor, instance: Instance) {
        self.by_type.insert(descriptor.type_id(), self.entries.len());
        self.entries.push(ManagedInstance {
            descriptor,
            instance,
        });
    }

    fn get_erased(&self, type_id: TypeId) -> Option<Instance> {
        self.by_type
            .get(&type_id)
            .map(|&index| self.entries[index].instance.clone())
    }

    /// Singleton of type `T`
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.get_erased(TypeId::of::<T>())
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// Managed instance by fully-qualified type name
    pub fn get_by_name(&self, name: &str) -> Option<&ManagedInstance> {
        self.entries.iter().find(|e| e.descriptor.name() == name)
    }

    /// Managed instances in build order
    pub fn instances(&self) -> impl Iterator<Item = &ManagedInstance> {
        self.entries.iter()
    }

    /// Controller instances in build order
    pub fn controllers(&self) -> impl Iterator<Item = &ManagedInstance> {
        self.entries
            .iter()
            .filter(|e| e.descriptor.role() == Role::Controller)
    }

    /// Component names in build order
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.descriptor.name()).collect()
    }

    /// Number of instances
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the graph holds nothing
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ObjectGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectGraph")
            .field("components", &self.names())
            .finish()
    }
}
