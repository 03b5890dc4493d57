//! Component Registry
//!
//! Auto-registration of injectable types. Each type submits a
//! [`ComponentEntry`] into the [`COMPONENTS`] linkme distributed slice at
//! compile time; [`Catalog::scan`](super::catalog::Catalog::scan) discovers
//! the entries living below the requested module roots.
//!
//! ```ignore
//! use trellis_infrastructure::register_component;
//!
//! register_component!(USER_SERVICE, UserService);
//! register_component!(USER_CONTROLLER, UserController);
//! ```

use super::descriptor::ComponentDescriptor;

pub use linkme;
pub use linkme::distributed_slice;

/// Registry entry for one injectable type
pub struct ComponentEntry {
    /// Produces the type's descriptor
    pub describe: fn() -> ComponentDescriptor,
}

// Auto-collection via linkme distributed slices - components submit entries at compile time
#[linkme::distributed_slice]
pub static COMPONENTS: [ComponentEntry] = [..];

/// Register an [`Injectable`](crate::di::Injectable) type for module scanning
///
/// The first argument names the generated static; it only has to be unique
/// within the enclosing module.
#[macro_export]
macro_rules! register_component {
    ($name:ident, $ty:ty) => {
        #[$crate::di::registry::distributed_slice($crate::di::registry::COMPONENTS)]
        #[linkme(crate = $crate::di::registry::linkme)]
        static $name: $crate::di::registry::ComponentEntry = $crate::di::registry::ComponentEntry {
            describe: $crate::di::ComponentDescriptor::of::<$ty>,
        };
    };
}

/// Every registered descriptor, in a link-order independent sequence
///
/// Entries are sorted by module path, then type name, so discovery order is
/// stable across builds.
pub fn registered_components() -> Vec<ComponentDescriptor> {
    let mut descriptors: Vec<ComponentDescriptor> =
        COMPONENTS.iter().map(|entry| (entry.describe)()).collect();
    descriptors.sort_by(|a, b| a.module().cmp(b.module()).then(a.name().cmp(b.name())));
    descriptors
}

/// Whether `module` equals `root` or lives below it
pub fn module_matches(module: &str, root: &str) -> bool {
    let root = root.trim_end_matches("::");
    if root.is_empty() {
        return true;
    }
    module == root
        || module
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with("::"))
}
