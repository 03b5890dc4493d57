//! Value objects shared by the catalog, the binder and the HTTP adapter

pub mod path;
pub mod role;
pub mod verb;

pub use path::{PathTemplate, Segment};
pub use role::Role;
pub use verb::Verb;
