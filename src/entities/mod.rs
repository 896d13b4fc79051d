//! Entity module - Contains the `SeaORM` entity definitions for the database.

pub mod store_blob;

pub use store_blob::{Column as StoreBlobColumn, Entity as StoreBlob, Model as StoreBlobModel};
