//! Core business logic - the entity store and everything derived from it.

/// Employee headcounts
pub mod employees;
/// Type filter and search
pub mod filter;
/// Spreadsheet bulk import and export
pub mod import;
/// Index labels
pub mod indexes;
/// Projects and hotels per province
pub mod province_info;
/// Derived statistics
pub mod stats;
/// Blob persistence
pub mod storage;
/// The store instance and change notifications
pub mod store;

pub use employees::EmployeeChange;
pub use stats::{FlatItem, Statistics};
pub use store::{AtlasStore, StoreChange, StoreEvent};
