//! Blob persistence for the store's collections.
//!
//! Every collection is written whole: a save replaces the previous JSON for its key, so
//! a reader never sees a partially applied mutation.

use crate::{
    entities::{StoreBlob, store_blob},
    errors::Result,
    models::{Employee, ProvinceInfo},
};
use chrono::{DateTime, Utc};
use sea_orm::{Set, prelude::*};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::trace;

/// Key of the province info blob
pub const PROVINCE_INFO_KEY: &str = "province-info-storage";
/// Key of the employee blob
pub const EMPLOYEE_KEY: &str = "employee-storage";
/// Key of the index blob
pub const INDEXES_KEY: &str = "indexes-storage";

/// Persisted shape of `province-info-storage`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceInfoState {
    /// One entry per province with recorded items
    pub province_info_list: Vec<ProvinceInfo>,
    /// Next item id to hand out
    #[serde(default)]
    pub next_item_id: u64,
}

/// Persisted shape of `employee-storage`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeState {
    /// At most one record per province, none with a zero count
    pub employees: Vec<Employee>,
    /// When the last spreadsheet import replaced the collection
    pub last_excel_import: Option<DateTime<Utc>>,
}

/// Persisted shape of `indexes-storage`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexState {
    /// Unique index labels in insertion order
    pub indexes: Vec<String>,
}

/// Reads and decodes the blob stored under `key`.
///
/// # Returns
/// * `Ok(Some(value))` - The blob exists and decoded
/// * `Ok(None)` - Nothing has been stored under `key` yet
pub async fn load_blob<C, T>(db: &C, key: &str) -> Result<Option<T>>
where
    C: ConnectionTrait,
    T: DeserializeOwned,
{
    let row = StoreBlob::find()
        .filter(store_blob::Column::Key.eq(key))
        .one(db)
        .await?;

    match row {
        Some(blob) => Ok(Some(serde_json::from_str(&blob.value)?)),
        None => Ok(None),
    }
}

/// Encodes `value` and writes it under `key`, replacing any previous blob.
pub async fn save_blob<C, T>(db: &C, key: &str, value: &T) -> Result<()>
where
    C: ConnectionTrait,
    T: Serialize,
{
    let json = serde_json::to_string(value)?;
    let now = Utc::now();

    let existing = StoreBlob::find()
        .filter(store_blob::Column::Key.eq(key))
        .one(db)
        .await?;

    if let Some(blob) = existing {
        let mut active_model: store_blob::ActiveModel = blob.into();
        active_model.value = Set(json);
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
    } else {
        let new_blob = store_blob::ActiveModel {
            key: Set(key.to_string()),
            value: Set(json),
            updated_at: Set(now),
            ..Default::default()
        };
        new_blob.insert(db).await?;
    }

    trace!("Saved blob {}", key);
    Ok(())
}
