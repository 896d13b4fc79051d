//! Type filter and search over the flattened item list.

use crate::core::stats::FlatItem;
use crate::models::Category;

/// Maximum number of search results.
pub const SEARCH_RESULT_LIMIT: usize = 10;

/// Builds the `"{category}-{type}"` key a filter selection refers to.
#[must_use]
pub fn type_key(category: Category, type_name: &str) -> String {
    format!("{category}-{type_name}")
}

/// Whitelist check: with nothing selected every item is visible, otherwise the item's
/// type key must be one of the selected keys.
#[must_use]
pub fn is_item_visible<S: AsRef<str>>(item: &FlatItem<'_>, selected: &[S]) -> bool {
    if selected.is_empty() {
        return true;
    }
    let key = item.item.type_key();
    selected.iter().any(|selected_key| selected_key.as_ref() == key)
}

/// Items passing the type filter, in list order. This is what the map draws as markers.
#[must_use]
pub fn visible_items<'a, S: AsRef<str>>(
    items: &[FlatItem<'a>],
    selected: &[S],
) -> Vec<FlatItem<'a>> {
    items
        .iter()
        .filter(|item| is_item_visible(item, selected))
        .copied()
        .collect()
}

/// Case-insensitive substring search over item name, type and province name.
///
/// Returns at most [`SEARCH_RESULT_LIMIT`] items in list order. A blank query returns
/// nothing.
#[must_use]
pub fn search<'a>(query: &str, items: &[FlatItem<'a>]) -> Vec<FlatItem<'a>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let matches = |haystack: &str| haystack.to_lowercase().contains(&needle);

    items
        .iter()
        .filter(|flat| {
            matches(&flat.item.name)
                || matches(&flat.item.type_name)
                || matches(&flat.province.name_fa)
                || matches(&flat.province.name_en)
        })
        .take(SEARCH_RESULT_LIMIT)
        .copied()
        .collect()
}
