//! Unified error type for the province atlas.
//!
//! Domain rejections (validation and lookup misses) are struct variants so callers and
//! tests can match on the exact reason a mutation was refused. Infrastructure failures
//! wrap their source error.

use crate::models::{Category, ItemId};
use thiserror::Error;

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or catalog is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Storage backend failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A persisted blob could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A required name was empty or whitespace-only
    #[error("{entity} name cannot be empty")]
    EmptyName {
        /// Kind of entity being named (e.g. "Item", "Index")
        entity: &'static str,
    },

    /// No non-blank label/value pair was supplied
    #[error("At least one field with a label and a value is required")]
    EmptyFields,

    /// The type is not part of the category's catalog
    #[error("Unknown {category} type: {type_name}")]
    UnknownType {
        /// Category the type was checked against
        category: Category,
        /// The rejected type name
        type_name: String,
    },

    /// Coordinates are not a valid latitude/longitude pair
    #[error("Invalid coordinates: [{latitude}, {longitude}]")]
    InvalidCoordinates {
        /// Latitude in degrees
        latitude: f64,
        /// Longitude in degrees
        longitude: f64,
    },

    /// Province name or id is not in the reference dataset
    #[error("Province not found: {name}")]
    ProvinceNotFound {
        /// The name or id that was looked up
        name: String,
    },

    /// No data has been recorded for the province
    #[error("No province info recorded for province {province_id}")]
    ProvinceInfoNotFound {
        /// Province id
        province_id: u32,
    },

    /// Item is not present in the province's list
    #[error("Item {item_id} not found in province {province_id}")]
    ItemNotFound {
        /// Province id
        province_id: u32,
        /// Item id
        item_id: ItemId,
    },

    /// Index label already exists
    #[error("Index already exists: {name}")]
    DuplicateIndex {
        /// Index label
        name: String,
    },

    /// Index label does not exist
    #[error("Index not found: {name}")]
    IndexNotFound {
        /// Index label
        name: String,
    },

    /// The last remaining index cannot be removed
    #[error("Cannot remove the last remaining index: {name}")]
    LastIndex {
        /// Index label
        name: String,
    },
}

impl Error {
    /// Returns true for rejections of invalid input or lookup misses, as opposed to
    /// infrastructure failures. Bulk import skips rows that fail with a rejection.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::EmptyName { .. }
                | Self::EmptyFields
                | Self::UnknownType { .. }
                | Self::InvalidCoordinates { .. }
                | Self::ProvinceNotFound { .. }
                | Self::ProvinceInfoNotFound { .. }
                | Self::ItemNotFound { .. }
                | Self::DuplicateIndex { .. }
                | Self::IndexNotFound { .. }
                | Self::LastIndex { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
