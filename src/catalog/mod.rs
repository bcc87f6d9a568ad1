//! Static lookup-table storage: the relation chain from entities to
//! reactions, pathways, and top-level pathways.

pub mod builder;
pub mod store;

pub use builder::CatalogBuilder;
pub use store::{CatalogError, MappingCatalog, Multimap, CATALOG_VERSION};
