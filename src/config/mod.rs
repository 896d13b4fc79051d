/// Database configuration and connection management
pub mod database;

/// Type catalog loading from config.toml
pub mod catalog;

pub use catalog::{Catalog, TypeConfig, load_catalog, load_catalog_or_default, parse_catalog};
