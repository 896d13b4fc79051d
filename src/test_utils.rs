//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases and
//! stores, and for creating test items with sensible defaults.

use crate::{
    config::Catalog,
    core::AtlasStore,
    errors::Result,
    models::{Coordinates, ItemField, NewItem, ProjectItem, Province},
    provinces,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Opens a store over a fresh in-memory database with the built-in catalog.
pub async fn setup_test_store() -> Result<AtlasStore> {
    setup_test_store_with(Catalog::default()).await
}

/// Opens a store over a fresh in-memory database with a custom catalog.
pub async fn setup_test_store_with(catalog: Catalog) -> Result<AtlasStore> {
    let db = setup_test_db().await?;
    AtlasStore::open(db, catalog).await
}

fn reference_province(id: u32) -> Province {
    provinces::find_by_id(id).unwrap_or_else(|| Province {
        id,
        name_fa: String::new(),
        name_en: String::new(),
    })
}

/// Tehran (id 1).
pub fn tehran() -> Province {
    reference_province(1)
}

/// Alborz (id 2).
pub fn alborz() -> Province {
    reference_province(2)
}

/// A point inside Tehran.
pub const fn tehran_coordinates() -> Coordinates {
    Coordinates::new(35.6892, 51.3890)
}

/// A single non-blank field.
pub fn sample_fields() -> Vec<ItemField> {
    vec![ItemField::new("length", "12")]
}

/// Adds an active tunnel project with [`sample_fields`].
pub async fn add_test_project(
    store: &mut AtlasStore,
    province: &Province,
    name: &str,
) -> Result<ProjectItem> {
    store
        .add_province_info(
            province,
            NewItem::project(name, "تونل", tehran_coordinates()),
            sample_fields(),
        )
        .await
}

/// Adds an active hotel with a capacity field.
pub async fn add_test_hotel(
    store: &mut AtlasStore,
    province: &Province,
    name: &str,
) -> Result<ProjectItem> {
    store
        .add_province_info(
            province,
            NewItem::hotel(name, "هتل", tehran_coordinates()),
            vec![ItemField::new("ظرفیت", "50")],
        )
        .await
}
