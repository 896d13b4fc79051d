//! The entity store - single source of truth for province info, employees and indexes.
//!
//! An [`AtlasStore`] is an explicit instance opened over a database connection. Mutators
//! take `&mut self`, validate their input, persist the whole updated collection, and only
//! then swap it into memory, bump the version and notify subscribers. A rejected or failed
//! mutation leaves both memory and storage untouched.
//!
//! The mutators themselves live next to their collections in
//! [`province_info`](super::province_info), [`employees`](super::employees) and
//! [`indexes`](super::indexes).

use crate::{
    config::Catalog,
    core::storage::{
        EMPLOYEE_KEY, EmployeeState, INDEXES_KEY, IndexState, PROVINCE_INFO_KEY,
        ProvinceInfoState, load_blob, save_blob,
    },
    errors::Result,
    models::ItemId,
};
use sea_orm::DatabaseConnection;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Which collection a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    /// Items of one province were added, updated or removed
    ProvinceInfo {
        /// Affected province
        province_id: u32,
    },
    /// The employee collection changed
    Employees,
    /// The index set changed
    Indexes,
}

/// Notification sent to subscribers after a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreEvent {
    /// Store version after the mutation
    pub version: u64,
    /// What changed
    pub change: StoreChange,
}

/// In-memory collections backed by durable blob storage.
#[derive(Debug)]
pub struct AtlasStore {
    pub(crate) db: DatabaseConnection,
    pub(crate) catalog: Catalog,
    pub(crate) province_info: ProvinceInfoState,
    pub(crate) employees: EmployeeState,
    pub(crate) indexes: IndexState,
    version: u64,
    events: broadcast::Sender<StoreEvent>,
}

impl AtlasStore {
    /// Opens the store, loading every collection from storage.
    ///
    /// A store that has never recorded an index set is seeded with the catalog's
    /// default indexes, and the seed is persisted immediately.
    #[instrument(skip_all)]
    pub async fn open(db: DatabaseConnection, catalog: Catalog) -> Result<Self> {
        catalog.validate()?;

        let mut province_info: ProvinceInfoState =
            load_blob(&db, PROVINCE_INFO_KEY).await?.unwrap_or_default();
        let assigned = assign_missing_item_ids(&mut province_info);
        if assigned > 0 {
            save_blob(&db, PROVINCE_INFO_KEY, &province_info).await?;
            info!("Assigned stable ids to {} stored items", assigned);
        }

        let employees: EmployeeState = load_blob(&db, EMPLOYEE_KEY).await?.unwrap_or_default();

        let indexes = match load_blob::<_, IndexState>(&db, INDEXES_KEY).await? {
            Some(state) if !state.indexes.is_empty() => state,
            _ => {
                let seeded = seed_indexes(&catalog);
                save_blob(&db, INDEXES_KEY, &seeded).await?;
                info!("Seeded {} default indexes", seeded.indexes.len());
                seeded
            }
        };

        info!(
            "Store opened: {} provinces with data, {} employee records, {} indexes",
            province_info.province_info_list.len(),
            employees.employees.len(),
            indexes.indexes.len()
        );

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            db,
            catalog,
            province_info,
            employees,
            indexes,
            version: 0,
            events,
        })
    }

    /// Subscribes to change notifications. Events are only delivered for mutations made
    /// after the call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Number of successful mutations since the store was opened.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// The type catalog the store validates against.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Persists the province info collection, then makes it current.
    pub(crate) async fn commit_province_info(
        &mut self,
        next: ProvinceInfoState,
        province_id: u32,
    ) -> Result<()> {
        save_blob(&self.db, PROVINCE_INFO_KEY, &next).await?;
        self.province_info = next;
        self.notify(StoreChange::ProvinceInfo { province_id });
        Ok(())
    }

    /// Persists the employee collection, then makes it current.
    pub(crate) async fn commit_employees(&mut self, next: EmployeeState) -> Result<()> {
        save_blob(&self.db, EMPLOYEE_KEY, &next).await?;
        self.employees = next;
        self.notify(StoreChange::Employees);
        Ok(())
    }

    /// Persists the index set, then makes it current.
    pub(crate) async fn commit_indexes(&mut self, next: IndexState) -> Result<()> {
        save_blob(&self.db, INDEXES_KEY, &next).await?;
        self.indexes = next;
        self.notify(StoreChange::Indexes);
        Ok(())
    }

    fn notify(&mut self, change: StoreChange) {
        self.version += 1;
        let event = StoreEvent {
            version: self.version,
            change,
        };
        // No subscribers is not an error
        let receivers = self.events.send(event).unwrap_or(0);
        debug!(
            "Store version {} ({:?}) sent to {} subscribers",
            self.version, change, receivers
        );
    }
}

/// Raises the id counter above every stored id, then gives each item without a stable
/// id the next one. Returns how many items were given an id.
fn assign_missing_item_ids(state: &mut ProvinceInfoState) -> usize {
    let floor = state
        .province_info_list
        .iter()
        .flat_map(|info| info.projects.iter())
        .map(|item| item.id.0 + 1)
        .max()
        .unwrap_or(1);
    state.next_item_id = state.next_item_id.max(floor);

    let mut assigned = 0;
    for item in state
        .province_info_list
        .iter_mut()
        .flat_map(|info| info.projects.iter_mut())
        .filter(|item| item.id.is_unassigned())
    {
        item.id = ItemId(state.next_item_id);
        state.next_item_id += 1;
        assigned += 1;
    }
    assigned
}

fn seed_indexes(catalog: &Catalog) -> IndexState {
    let mut indexes: Vec<String> = Vec::new();
    for name in &catalog.default_indexes {
        let name = name.trim();
        if !name.is_empty() && !indexes.iter().any(|existing| existing == name) {
            indexes.push(name.to_string());
        }
    }
    IndexState { indexes }
}
