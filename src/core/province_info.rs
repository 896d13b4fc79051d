//! Province info business logic - projects and hotels recorded per province.
//!
//! Items are appended to the owning province's entry, creating it on first use, so the
//! collection never holds two entries for the same province. Every save of an item's
//! fields replaces the whole field list.

use crate::{
    core::{storage::ProvinceInfoState, store::AtlasStore},
    errors::{Error, Result},
    models::{ItemField, ItemId, NewItem, ProjectItem, Province, ProvinceInfo},
};
use tracing::{info, instrument};

/// Drops blank pairs and trims the rest. Fails when nothing is left.
fn clean_fields(fields: Vec<ItemField>) -> Result<Vec<ItemField>> {
    let cleaned: Vec<ItemField> = fields
        .into_iter()
        .filter(|field| !field.is_blank())
        .map(|field| ItemField::new(field.label.trim(), field.value.trim()))
        .collect();

    if cleaned.is_empty() {
        return Err(Error::EmptyFields);
    }
    Ok(cleaned)
}

fn find_item_mut(
    state: &mut ProvinceInfoState,
    province_id: u32,
    item_id: ItemId,
) -> Result<&mut ProjectItem> {
    let info = state
        .province_info_list
        .iter_mut()
        .find(|info| info.province.id == province_id)
        .ok_or(Error::ProvinceInfoNotFound { province_id })?;

    info.projects
        .iter_mut()
        .find(|item| item.id == item_id)
        .ok_or(Error::ItemNotFound {
            province_id,
            item_id,
        })
}

impl AtlasStore {
    /// All provinces with recorded data, in insertion order.
    #[must_use]
    pub fn province_info_list(&self) -> &[ProvinceInfo] {
        &self.province_info.province_info_list
    }

    /// Finds the entry for a province. `None` means no data has been recorded for it.
    #[must_use]
    pub fn province_info(&self, province_id: u32) -> Option<&ProvinceInfo> {
        self.province_info
            .province_info_list
            .iter()
            .find(|info| info.province.id == province_id)
    }

    /// Finds a single item.
    #[must_use]
    pub fn item(&self, province_id: u32, item_id: ItemId) -> Option<&ProjectItem> {
        self.province_info(province_id)?
            .projects
            .iter()
            .find(|item| item.id == item_id)
    }

    /// Appends a new project or hotel to a province, creating the province's entry if
    /// it has none yet.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The item name is empty or whitespace-only
    /// - The type is not in the catalog for the item's category
    /// - The coordinates are out of range or not finite
    /// - No field has both a label and a value
    /// - The updated collection cannot be persisted
    #[instrument(skip(self, province, item, fields), fields(province_id = province.id))]
    pub async fn add_province_info(
        &mut self,
        province: &Province,
        item: NewItem,
        fields: Vec<ItemField>,
    ) -> Result<ProjectItem> {
        let name = item.name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName { entity: "Item" });
        }

        let type_name = item.type_name.trim();
        if !self.catalog.contains_type(item.category, type_name) {
            return Err(Error::UnknownType {
                category: item.category,
                type_name: type_name.to_string(),
            });
        }

        if !item.coordinates.is_valid() {
            return Err(Error::InvalidCoordinates {
                latitude: item.coordinates.latitude,
                longitude: item.coordinates.longitude,
            });
        }

        let fields = clean_fields(fields)?;

        let mut next = self.province_info.clone();
        let project = ProjectItem {
            id: ItemId(next.next_item_id),
            name: name.to_string(),
            type_name: type_name.to_string(),
            category: item.category,
            coordinates: item.coordinates,
            is_active: item.is_active,
            fields,
        };
        next.next_item_id += 1;

        match next
            .province_info_list
            .iter_mut()
            .find(|info| info.province.id == province.id)
        {
            Some(info) => {
                info.province = province.clone();
                info.projects.push(project.clone());
            }
            None => next.province_info_list.push(ProvinceInfo {
                province: province.clone(),
                projects: vec![project.clone()],
            }),
        }

        self.commit_province_info(next, province.id).await?;
        info!(
            "Added {} {} ({}) to {}",
            project.category, project.id, project.name, province.name_en
        );
        Ok(project)
    }

    /// Replaces an item's whole field list.
    #[instrument(skip(self, fields))]
    pub async fn update_item_fields(
        &mut self,
        province_id: u32,
        item_id: ItemId,
        fields: Vec<ItemField>,
    ) -> Result<ProjectItem> {
        let fields = clean_fields(fields)?;

        let mut next = self.province_info.clone();
        let item = find_item_mut(&mut next, province_id, item_id)?;
        item.fields = fields;
        let updated = item.clone();

        self.commit_province_info(next, province_id).await?;
        info!("Replaced fields of item {}", item_id);
        Ok(updated)
    }

    /// Marks an item active or inactive.
    #[instrument(skip(self))]
    pub async fn set_item_active(
        &mut self,
        province_id: u32,
        item_id: ItemId,
        is_active: bool,
    ) -> Result<ProjectItem> {
        let mut next = self.province_info.clone();
        let item = find_item_mut(&mut next, province_id, item_id)?;
        item.is_active = is_active;
        let updated = item.clone();

        self.commit_province_info(next, province_id).await?;
        Ok(updated)
    }

    /// Removes one item. The remaining items keep their ids.
    #[instrument(skip(self))]
    pub async fn remove_item(&mut self, province_id: u32, item_id: ItemId) -> Result<ProjectItem> {
        let mut next = self.province_info.clone();
        let info = next
            .province_info_list
            .iter_mut()
            .find(|info| info.province.id == province_id)
            .ok_or(Error::ProvinceInfoNotFound { province_id })?;
        let position = info
            .projects
            .iter()
            .position(|item| item.id == item_id)
            .ok_or(Error::ItemNotFound {
                province_id,
                item_id,
            })?;
        let removed = info.projects.remove(position);

        self.commit_province_info(next, province_id).await?;
        info!("Removed item {} ({})", removed.id, removed.name);
        Ok(removed)
    }

    /// Deletes everything recorded for a province, including all of its items.
    #[instrument(skip(self))]
    pub async fn remove_province_info(&mut self, province_id: u32) -> Result<ProvinceInfo> {
        let mut next = self.province_info.clone();
        let position = next
            .province_info_list
            .iter()
            .position(|info| info.province.id == province_id)
            .ok_or(Error::ProvinceInfoNotFound { province_id })?;
        let removed = next.province_info_list.remove(position);

        self.commit_province_info(next, province_id).await?;
        info!(
            "Removed province info for {} ({} items)",
            removed.province.name_en,
            removed.projects.len()
        );
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::models::{Category, Coordinates};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_add_creates_province_entry() -> Result<()> {
        let mut store = setup_test_store().await?;
        assert!(store.province_info(1).is_none());

        let item = add_test_project(&mut store, &tehran(), "Road1").await?;

        let info = store.province_info(1).unwrap();
        assert_eq!(info.province, tehran());
        assert_eq!(info.projects, vec![item]);
        Ok(())
    }

    #[tokio::test]
    async fn test_same_province_appends_instead_of_merging() -> Result<()> {
        let mut store = setup_test_store().await?;

        let first = add_test_project(&mut store, &tehran(), "Road1").await?;
        let second = add_test_project(&mut store, &tehran(), "Road2").await?;

        assert_eq!(store.province_info_list().len(), 1);
        let info = store.province_info(1).unwrap();
        assert_eq!(info.projects.len(), 2);
        assert_eq!(info.projects[0].fields, first.fields);
        assert_eq!(info.projects[1].name, "Road2");
        assert_ne!(first.id, second.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_one_entry_per_province_across_many_adds() -> Result<()> {
        let mut store = setup_test_store().await?;

        for i in 0..5 {
            add_test_project(&mut store, &tehran(), &format!("Road{i}")).await?;
            add_test_hotel(&mut store, &alborz(), &format!("Hotel{i}")).await?;
        }

        let list = store.province_info_list();
        assert_eq!(list.len(), 2);
        assert_eq!(list.iter().filter(|info| info.province.id == 1).count(), 1);
        assert_eq!(store.province_info(1).unwrap().projects.len(), 5);
        assert_eq!(store.province_info(2).unwrap().projects.len(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_tehran_project_and_hotel_scenario() -> Result<()> {
        let mut store = setup_test_store().await?;

        store
            .add_province_info(
                &tehran(),
                NewItem::project("Road1", "تونل", tehran_coordinates()),
                vec![ItemField::new("X", "5")],
            )
            .await?;
        store
            .add_province_info(
                &tehran(),
                NewItem::hotel("H1", "هتل", tehran_coordinates()),
                vec![ItemField::new("ظرفیت", "50")],
            )
            .await?;

        let info = store.province_info(1).unwrap();
        assert_eq!(info.projects.len(), 2);
        assert_eq!(info.count_in(Category::Project), 1);
        assert_eq!(info.count_in(Category::Hotel), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_fields_are_dropped_and_trimmed() -> Result<()> {
        let mut store = setup_test_store().await?;

        let item = store
            .add_province_info(
                &tehran(),
                NewItem::project("Road1", "راه", tehran_coordinates()),
                vec![
                    ItemField::new("", "orphan value"),
                    ItemField::new(" length ", " 12 km "),
                    ItemField::new("budget", "  "),
                ],
            )
            .await?;

        assert_eq!(item.fields, vec![ItemField::new("length", "12 km")]);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_rejections_leave_store_untouched() -> Result<()> {
        let mut store = setup_test_store().await?;

        let empty_fields = store
            .add_province_info(
                &tehran(),
                NewItem::project("Road1", "تونل", tehran_coordinates()),
                vec![ItemField::new(" ", "")],
            )
            .await;
        assert!(matches!(empty_fields.unwrap_err(), Error::EmptyFields));

        let empty_name = store
            .add_province_info(
                &tehran(),
                NewItem::project("  ", "تونل", tehran_coordinates()),
                sample_fields(),
            )
            .await;
        assert!(matches!(
            empty_name.unwrap_err(),
            Error::EmptyName { entity: "Item" }
        ));

        let hotel_type_on_project = store
            .add_province_info(
                &tehran(),
                NewItem::project("Road1", "هتل", tehran_coordinates()),
                sample_fields(),
            )
            .await;
        assert!(matches!(
            hotel_type_on_project.unwrap_err(),
            Error::UnknownType {
                category: Category::Project,
                ..
            }
        ));

        let bad_coordinates = store
            .add_province_info(
                &tehran(),
                NewItem::project("Road1", "تونل", Coordinates::new(120.0, 51.0)),
                sample_fields(),
            )
            .await;
        assert!(matches!(
            bad_coordinates.unwrap_err(),
            Error::InvalidCoordinates { .. }
        ));

        assert!(store.province_info_list().is_empty());
        assert_eq!(store.version(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_inactive_item_keeps_flag() -> Result<()> {
        let mut store = setup_test_store().await?;
        let item = store
            .add_province_info(
                &tehran(),
                NewItem::project("Old bridge", "پل", tehran_coordinates()).with_active(false),
                sample_fields(),
            )
            .await?;
        assert!(!item.is_active);

        let reactivated = store.set_item_active(1, item.id, true).await?;
        assert!(reactivated.is_active);
        assert!(store.item(1, item.id).unwrap().is_active);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_fields_replaces_whole_list() -> Result<()> {
        let mut store = setup_test_store().await?;
        let item = store
            .add_province_info(
                &tehran(),
                NewItem::project("Road1", "راه", tehran_coordinates()),
                vec![ItemField::new("length", "12"), ItemField::new("lanes", "4")],
            )
            .await?;

        let updated = store
            .update_item_fields(1, item.id, vec![ItemField::new("budget", "900")])
            .await?;

        assert_eq!(updated.fields, vec![ItemField::new("budget", "900")]);
        assert_eq!(store.item(1, item.id).unwrap().fields, updated.fields);

        let rejected = store.update_item_fields(1, item.id, Vec::new()).await;
        assert!(matches!(rejected.unwrap_err(), Error::EmptyFields));
        assert_eq!(store.item(1, item.id).unwrap().fields, updated.fields);
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_item_keeps_other_ids_stable() -> Result<()> {
        let mut store = setup_test_store().await?;
        let first = add_test_project(&mut store, &tehran(), "Road1").await?;
        let second = add_test_project(&mut store, &tehran(), "Road2").await?;
        let third = add_test_project(&mut store, &tehran(), "Road3").await?;

        let removed = store.remove_item(1, first.id).await?;
        assert_eq!(removed.name, "Road1");

        assert_eq!(store.item(1, second.id).unwrap().name, "Road2");
        assert_eq!(store.item(1, third.id).unwrap().name, "Road3");
        assert!(store.item(1, first.id).is_none());

        let fourth = add_test_project(&mut store, &tehran(), "Road4").await?;
        assert!(fourth.id > third.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_item_lookup_misses() -> Result<()> {
        let mut store = setup_test_store().await?;
        let item = add_test_project(&mut store, &tehran(), "Road1").await?;

        let wrong_province = store.set_item_active(2, item.id, false).await;
        assert!(matches!(
            wrong_province.unwrap_err(),
            Error::ProvinceInfoNotFound { province_id: 2 }
        ));

        let wrong_item = store.remove_item(1, ItemId(999)).await;
        assert!(matches!(
            wrong_item.unwrap_err(),
            Error::ItemNotFound {
                province_id: 1,
                item_id: ItemId(999)
            }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_province_info_drops_all_items() -> Result<()> {
        let mut store = setup_test_store().await?;
        add_test_project(&mut store, &tehran(), "Road1").await?;
        add_test_hotel(&mut store, &tehran(), "H1").await?;
        add_test_hotel(&mut store, &alborz(), "H2").await?;

        let removed = store.remove_province_info(1).await?;
        assert_eq!(removed.projects.len(), 2);
        assert!(store.province_info(1).is_none());
        assert_eq!(store.province_info_list().len(), 1);

        let again = store.remove_province_info(1).await;
        assert!(matches!(
            again.unwrap_err(),
            Error::ProvinceInfoNotFound { province_id: 1 }
        ));
        Ok(())
    }
}
