//! Derived statistics over the store.
//!
//! Everything here is recomputed from the store's current collections on every call and
//! returns plain data that the map, dashboard and chart views render. Nothing is cached.

use crate::{
    config::Catalog,
    core::store::AtlasStore,
    models::{Category, Employee, ProjectItem, Province, ProvinceInfo},
};
use serde::Serialize;

/// Number of provinces in the "top provinces" summary.
pub const TOP_PROVINCES_LIMIT: usize = 5;

/// An item tagged with the province that owns it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatItem<'a> {
    /// Owning province
    pub province: &'a Province,
    /// The item
    pub item: &'a ProjectItem,
}

impl FlatItem<'_> {
    /// Persian name of the owning province.
    #[must_use]
    pub fn province_name(&self) -> &str {
        &self.province.name_fa
    }
}

/// Count of items of one type, with the type's chart color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCount {
    /// Type name
    pub type_name: String,
    /// Chart color from the catalog
    pub color: String,
    /// Number of items of this type
    pub count: usize,
}

/// Aggregates for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    /// All items in the category
    pub total: usize,
    /// Items with `is_active`
    pub active: usize,
    /// Items without `is_active`
    pub inactive: usize,
    /// Per-type counts in catalog order; types without items are omitted
    pub by_type: Vec<TypeCount>,
}

/// A province's position in the item-count ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceRank {
    /// Province id
    pub province_id: u32,
    /// Persian province name
    pub province_name: String,
    /// Number of projects
    pub projects: usize,
    /// Number of hotels
    pub hotels: usize,
}

impl ProvinceRank {
    /// Projects plus hotels.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.projects + self.hotels
    }
}

/// Dashboard summary of the whole store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Projects and hotels together
    pub total_items: usize,
    /// Project aggregates
    pub projects: CategoryStats,
    /// Hotel aggregates
    pub hotels: CategoryStats,
    /// Sum of all headcounts
    pub total_employees: u64,
    /// Provinces with a non-zero headcount
    pub provinces_with_employees: usize,
    /// Provinces with at least one item
    pub provinces_with_data: usize,
    /// Provinces with the most items, best first
    pub top_provinces: Vec<ProvinceRank>,
}

/// Flattens every province's items into one list, in store order.
#[must_use]
pub fn flatten(list: &[ProvinceInfo]) -> Vec<FlatItem<'_>> {
    list.iter()
        .flat_map(|info| {
            info.projects.iter().map(move |item| FlatItem {
                province: &info.province,
                item,
            })
        })
        .collect()
}

/// Aggregates the items of one category.
#[must_use]
pub fn category_stats(
    items: &[FlatItem<'_>],
    catalog: &Catalog,
    category: Category,
) -> CategoryStats {
    let in_category: Vec<&ProjectItem> = items
        .iter()
        .map(|flat| flat.item)
        .filter(|item| item.category == category)
        .collect();

    let active = in_category.iter().filter(|item| item.is_active).count();

    let by_type = catalog
        .types(category)
        .iter()
        .filter_map(|type_config| {
            let count = in_category
                .iter()
                .filter(|item| item.type_name == type_config.name)
                .count();
            (count > 0).then(|| TypeCount {
                type_name: type_config.name.clone(),
                color: type_config.color.clone(),
                count,
            })
        })
        .collect();

    CategoryStats {
        total: in_category.len(),
        active,
        inactive: in_category.len() - active,
        by_type,
    }
}

/// Sum of all headcounts.
#[must_use]
pub fn total_employees(employees: &[Employee]) -> u64 {
    employees
        .iter()
        .map(|employee| u64::from(employee.employee_count))
        .sum()
}

/// Ranks provinces by item count, highest first, keeping at most `limit`.
///
/// The sort is stable, so equal counts keep the store's insertion order. Provinces
/// without items are not ranked.
#[must_use]
pub fn top_provinces(list: &[ProvinceInfo], limit: usize) -> Vec<ProvinceRank> {
    let mut ranks: Vec<ProvinceRank> = list
        .iter()
        .map(|info| ProvinceRank {
            province_id: info.province.id,
            province_name: info.province.name_fa.clone(),
            projects: info.count_in(Category::Project),
            hotels: info.count_in(Category::Hotel),
        })
        .filter(|rank| rank.total() > 0)
        .collect();

    ranks.sort_by(|a, b| b.total().cmp(&a.total()));
    ranks.truncate(limit);
    ranks
}

/// Computes the full dashboard summary.
#[must_use]
pub fn compute(list: &[ProvinceInfo], employees: &[Employee], catalog: &Catalog) -> Statistics {
    let items = flatten(list);

    Statistics {
        total_items: items.len(),
        projects: category_stats(&items, catalog, Category::Project),
        hotels: category_stats(&items, catalog, Category::Hotel),
        total_employees: total_employees(employees),
        provinces_with_employees: employees
            .iter()
            .filter(|employee| employee.employee_count > 0)
            .count(),
        provinces_with_data: list.iter().filter(|info| !info.projects.is_empty()).count(),
        top_provinces: top_provinces(list, TOP_PROVINCES_LIMIT),
    }
}

impl AtlasStore {
    /// Every item tagged with its province, in store order.
    #[must_use]
    pub fn flat_items(&self) -> Vec<FlatItem<'_>> {
        flatten(self.province_info_list())
    }

    /// Dashboard summary of the current state.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        compute(self.province_info_list(), self.employees(), self.catalog())
    }
}
