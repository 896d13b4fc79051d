//! Store blob entity - durable key/value storage for the store's collections.
//!
//! Each logical store (`province-info-storage`, `employee-storage`, `indexes-storage`)
//! is one row whose value is the JSON encoding of the whole collection.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Store blob database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "store_blobs")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Logical store name
    #[sea_orm(unique)]
    pub key: String,
    /// JSON encoding of the collection
    pub value: String,
    /// When the blob was last written
    pub updated_at: DateTimeUtc,
}

/// Blobs have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
