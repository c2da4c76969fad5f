//! Class registry and its cache backends.

mod cache;
mod class_registry;
mod scope;

pub use cache::{FileCache, MemoryCache, NoCache, RegistryCache};
pub use class_registry::{ClassMap, ClassRegistry};
pub use scope::{InvalidScopeKey, ScopeKey, resolve_scopes};
