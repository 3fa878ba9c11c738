//! variable-injector - KRM function for per-resource variable injection
//!
//! Reads a ResourceList, selects resources with declarative target selectors, merges
//! the variables of every replacement that applies to a resource, and expands `${...}`
//! placeholders in that resource's string fields.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod expand;
pub mod processor;
pub mod resource;
pub mod resource_list;
pub mod selector;
pub mod version;

pub use aggregate::{aggregate, Aggregation};
pub use config::{Config, Replacement};
pub use error::{InjectorError, Result};
pub use processor::{process, process_all};
pub use resource::ResourceDescriptor;
pub use resource_list::ResourceList;
pub use selector::Selector;
