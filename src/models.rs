//! Domain records held by the store and written to the persisted blobs.
//!
//! Field names serialize in camelCase so the blobs keep the layout used by the map client
//! (`provinceInfoList`, `isActive`, `employeeCount`, ...). Provinces are the exception:
//! the reference dataset names them `name_fa` / `name_en`.

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, Unexpected, Visitor},
};
use std::fmt;

/// A province from the static reference dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    /// Unique identifier
    pub id: u32,
    /// Persian display name
    #[serde(alias = "nameFa")]
    pub name_fa: String,
    /// English display name
    #[serde(alias = "nameEn")]
    pub name_en: String,
}

/// Partition tag of a [`ProjectItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Infrastructure or development project
    Project,
    /// Hotel or other accommodation
    Hotel,
}

impl Category {
    /// Lowercase tag used in type keys and persisted blobs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Hotel => "hotel",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable opaque identifier of a [`ProjectItem`], never reused after removal.
///
/// Assigned ids start at 1. Blobs written by the map client carry position-derived
/// string ids such as `"1-0"`; those decode as [`ItemId::UNASSIGNED`] and the store
/// hands out fresh ids for them when it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Placeholder for an item that has not been given a stable id yet.
    pub const UNASSIGNED: Self = Self(0);

    /// True for [`ItemId::UNASSIGNED`].
    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        self.0 == Self::UNASSIGNED.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct ItemIdVisitor;

impl Visitor<'_> for ItemIdVisitor {
    type Value = ItemId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer id or a string id")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<ItemId, E> {
        Ok(ItemId(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<ItemId, E> {
        u64::try_from(value)
            .map(ItemId)
            .map_err(|_| E::invalid_value(Unexpected::Signed(value), &self))
    }

    // String ids are list positions, not identities
    fn visit_str<E: de::Error>(self, _value: &str) -> Result<ItemId, E> {
        Ok(ItemId::UNASSIGNED)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ItemIdVisitor)
    }
}

/// Marker position, persisted as a `[latitude, longitude]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both values are finite and within the geographic range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(value: Coordinates) -> Self {
        [value.latitude, value.longitude]
    }
}

/// A single `{label, value}` entry on an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemField {
    /// Field label, taken from the curated field list
    pub label: String,
    /// Free-text or numeric value
    pub value: String,
}

impl ItemField {
    /// Creates a field.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// A field is blank when either its label or its value is empty after trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.label.trim().is_empty() || self.value.trim().is_empty()
    }
}

const fn default_active() -> bool {
    true
}

/// A project or hotel recorded for a province.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    /// Stable identifier assigned at creation
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Type from the category's catalog
    #[serde(rename = "type")]
    pub type_name: String,
    /// Project or hotel
    pub category: Category,
    /// Marker position
    pub coordinates: Coordinates,
    /// Inactive items stay on the map but are counted separately
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Ordered field list, replaced as a whole on every save
    pub fields: Vec<ItemField>,
}

impl ProjectItem {
    /// Composite `"{category}-{type}"` key used by the type filter.
    #[must_use]
    pub fn type_key(&self) -> String {
        format!("{}-{}", self.category, self.type_name)
    }
}

/// All items recorded for one province.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvinceInfo {
    /// The province this record belongs to
    pub province: Province,
    /// Items in insertion order
    pub projects: Vec<ProjectItem>,
}

impl ProvinceInfo {
    /// Number of items in the given category.
    #[must_use]
    pub fn count_in(&self, category: Category) -> usize {
        self.projects
            .iter()
            .filter(|item| item.category == category)
            .count()
    }
}

/// Headcount for a province. Records with a zero count are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Province id
    pub province_id: u32,
    /// Province display name at the time of recording
    pub province_name: String,
    /// Number of employees
    pub employee_count: u32,
}

impl Employee {
    /// Creates an employee record.
    pub fn new(province_id: u32, province_name: impl Into<String>, employee_count: u32) -> Self {
        Self {
            province_id,
            province_name: province_name.into(),
            employee_count,
        }
    }
}

/// Metadata for an item about to be added. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    /// Display name
    pub name: String,
    /// Type from the category's catalog
    pub type_name: String,
    /// Project or hotel
    pub category: Category,
    /// Marker position
    pub coordinates: Coordinates,
    /// Defaults to true
    pub is_active: bool,
}

impl NewItem {
    /// Active item of the given category.
    pub fn new(
        category: Category,
        name: impl Into<String>,
        type_name: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            category,
            coordinates,
            is_active: true,
        }
    }

    /// Active project.
    pub fn project(
        name: impl Into<String>,
        type_name: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        Self::new(Category::Project, name, type_name, coordinates)
    }

    /// Active hotel.
    pub fn hotel(
        name: impl Into<String>,
        type_name: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        Self::new(Category::Hotel, name, type_name, coordinates)
    }

    /// Sets the active flag.
    #[must_use]
    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}
