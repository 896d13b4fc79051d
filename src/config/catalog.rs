//! Type catalog loading from config.toml
//!
//! The catalog fixes which project and hotel types exist, the chart color of each type,
//! and the index labels seeded into an empty store. A built-in catalog is used when no
//! config file is present.

use crate::{
    errors::{Error, Result},
    models::Category,
};
use serde::Deserialize;
use std::{collections::HashSet, path::Path};
use tracing::{debug, info};

/// A type entry with its chart color.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeConfig {
    /// Type name as shown on forms and stored on items
    pub name: String,
    /// CSS color used for markers and charts
    pub color: String,
}

impl TypeConfig {
    fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    /// Allowed project types, in chart order
    pub project_types: Vec<TypeConfig>,
    /// Allowed hotel types, in chart order
    pub hotel_types: Vec<TypeConfig>,
    /// Index labels seeded into a fresh store
    pub default_indexes: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            project_types: vec![
                TypeConfig::new("راه", "#1f77b4"),
                TypeConfig::new("پل", "#ff7f0e"),
                TypeConfig::new("تونل", "#2ca02c"),
                TypeConfig::new("راه آهن", "#d62728"),
                TypeConfig::new("فرودگاه", "#9467bd"),
                TypeConfig::new("بندر", "#8c564b"),
                TypeConfig::new("ساختمان", "#e377c2"),
            ],
            hotel_types: vec![
                TypeConfig::new("هتل", "#17becf"),
                TypeConfig::new("هتل آپارتمان", "#bcbd22"),
                TypeConfig::new("مهمانپذیر", "#7f7f7f"),
                TypeConfig::new("اقامتگاه بومگردی", "#aec7e8"),
            ],
            default_indexes: vec![
                "جمعیت".to_string(),
                "مساحت".to_string(),
                "تعداد شهرستان".to_string(),
            ],
        }
    }
}

impl Catalog {
    /// Types of a category in configured order.
    #[must_use]
    pub fn types(&self, category: Category) -> &[TypeConfig] {
        match category {
            Category::Project => &self.project_types,
            Category::Hotel => &self.hotel_types,
        }
    }

    /// True when `type_name` belongs to the category.
    #[must_use]
    pub fn contains_type(&self, category: Category, type_name: &str) -> bool {
        self.types(category).iter().any(|t| t.name == type_name)
    }

    /// Chart color of a type, if the type is known.
    #[must_use]
    pub fn color_of(&self, category: Category, type_name: &str) -> Option<&str> {
        self.types(category)
            .iter()
            .find(|t| t.name == type_name)
            .map(|t| t.color.as_str())
    }

    /// Checks that both type sets are non-empty and free of duplicates, and that at least
    /// one index label will be seeded.
    pub fn validate(&self) -> Result<()> {
        for category in [Category::Project, Category::Hotel] {
            let types = self.types(category);
            if types.is_empty() {
                return Err(Error::Config {
                    message: format!("No {category} types configured"),
                });
            }
            let mut seen = HashSet::new();
            for t in types {
                if t.name.trim().is_empty() {
                    return Err(Error::Config {
                        message: format!("Empty {category} type name"),
                    });
                }
                if !seen.insert(t.name.as_str()) {
                    return Err(Error::Config {
                        message: format!("Duplicate {category} type: {}", t.name),
                    });
                }
            }
        }

        if !self.default_indexes.iter().any(|i| !i.trim().is_empty()) {
            return Err(Error::Config {
                message: "At least one default index is required".to_string(),
            });
        }

        Ok(())
    }
}

/// Parses and validates a catalog from TOML text.
pub fn parse_catalog(contents: &str) -> Result<Catalog> {
    let catalog: Catalog = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    catalog.validate()?;
    Ok(catalog)
}

/// Loads the catalog from a TOML file.
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid or required fields are missing
/// - The catalog fails validation
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path_ref = path.as_ref();
    debug!("Loading catalog from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;
    parse_catalog(&contents)
}

/// Loads the catalog from `path` when it exists, otherwise falls back to the built-in one.
pub fn load_catalog_or_default<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path_ref = path.as_ref();
    if path_ref.exists() {
        load_catalog(path_ref)
    } else {
        info!(
            "No config file at {:?}, using the built-in catalog",
            path_ref
        );
        Ok(Catalog::default())
    }
}
