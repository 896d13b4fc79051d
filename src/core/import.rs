//! Spreadsheet bulk import and export.
//!
//! A [`Workbook`] holds the already-parsed rows of the three optional sheets. Importing
//! appends project and hotel rows one by one and, when an employee sheet is present,
//! replaces the employee collection. Rows the store rejects or whose province cannot be
//! resolved are skipped and counted; storage failures abort the import.

use crate::{
    core::store::AtlasStore,
    errors::{Error, Result},
    models::{Category, Coordinates, Employee, ItemField, NewItem, ProjectItem},
    provinces,
};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use tracing::{info, instrument, warn};

/// A row of the projects or hotels sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRow {
    /// Province name, Persian or English
    pub province: String,
    /// Item name
    pub name: String,
    /// Item type
    #[serde(rename = "type")]
    pub type_name: String,
    /// Latitude, if the cell was filled
    pub latitude: Option<f64>,
    /// Longitude, if the cell was filled
    pub longitude: Option<f64>,
    /// Active flag; an empty cell means active
    pub is_active: Option<bool>,
    /// Remaining columns as label/value pairs
    #[serde(default)]
    pub fields: Vec<ItemField>,
}

/// A row of the employees sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRow {
    /// Province name, Persian or English
    pub province: String,
    /// Headcount
    pub employee_count: u32,
}

/// Parsed workbook. A `None` sheet was absent from the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    /// Projects sheet
    pub projects: Option<Vec<ItemRow>>,
    /// Hotels sheet
    pub hotels: Option<Vec<ItemRow>>,
    /// Employees sheet
    pub employees: Option<Vec<EmployeeRow>>,
}

/// Row counts for one sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SheetSummary {
    /// Rows applied to the store
    pub imported: usize,
    /// Rows skipped because of invalid data or an unknown province
    pub skipped: usize,
}

/// Outcome of [`import_workbook`], one entry per sheet that was present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Projects sheet
    pub projects: Option<SheetSummary>,
    /// Hotels sheet
    pub hotels: Option<SheetSummary>,
    /// Employees sheet
    pub employees: Option<SheetSummary>,
}

impl ImportSummary {
    fn sheets(&self) -> [(&'static str, Option<SheetSummary>); 3] {
        [
            ("projects", self.projects),
            ("hotels", self.hotels),
            ("employees", self.employees),
        ]
    }

    /// Rows imported across all sheets.
    #[must_use]
    pub fn imported(&self) -> usize {
        self.sheets()
            .iter()
            .filter_map(|(_, sheet)| *sheet)
            .map(|sheet| sheet.imported)
            .sum()
    }

    /// Rows skipped across all sheets.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.sheets()
            .iter()
            .filter_map(|(_, sheet)| *sheet)
            .map(|sheet| sheet.skipped)
            .sum()
    }

    /// One-line message for the notification shown after an import.
    #[must_use]
    pub fn message(&self) -> String {
        let mut message = format!(
            "{} rows imported, {} rows skipped",
            self.imported(),
            self.skipped()
        );
        for (name, sheet) in self.sheets() {
            if let Some(sheet) = sheet {
                let _ = write!(
                    message,
                    "; {name}: {}/{}",
                    sheet.imported,
                    sheet.imported + sheet.skipped
                );
            }
        }
        message
    }
}

async fn import_item_row(
    store: &mut AtlasStore,
    category: Category,
    row: ItemRow,
) -> Result<ProjectItem> {
    let province = provinces::find_by_name(&row.province).ok_or_else(|| Error::ProvinceNotFound {
        name: row.province.clone(),
    })?;

    let (Some(latitude), Some(longitude)) = (row.latitude, row.longitude) else {
        return Err(Error::InvalidCoordinates {
            latitude: row.latitude.unwrap_or(f64::NAN),
            longitude: row.longitude.unwrap_or(f64::NAN),
        });
    };

    let item = NewItem::new(
        category,
        row.name,
        row.type_name,
        Coordinates::new(latitude, longitude),
    )
    .with_active(row.is_active.unwrap_or(true));

    store.add_province_info(&province, item, row.fields).await
}

async fn import_item_sheet(
    store: &mut AtlasStore,
    category: Category,
    rows: Vec<ItemRow>,
) -> Result<SheetSummary> {
    let mut summary = SheetSummary::default();
    for (index, row) in rows.into_iter().enumerate() {
        match import_item_row(store, category, row).await {
            Ok(_) => summary.imported += 1,
            Err(e) if e.is_rejection() => {
                warn!("Skipping {} row {}: {}", category, index + 1, e);
                summary.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(summary)
}

async fn import_employee_sheet(
    store: &mut AtlasStore,
    rows: Vec<EmployeeRow>,
) -> Result<SheetSummary> {
    let total = rows.len();
    let mut employees = Vec::with_capacity(total);

    for (index, row) in rows.into_iter().enumerate() {
        match provinces::find_by_name(&row.province) {
            Some(province) => employees.push(Employee::new(
                province.id,
                province.name_fa,
                row.employee_count,
            )),
            None => warn!(
                "Skipping employee row {}: unknown province {}",
                index + 1,
                row.province
            ),
        }
    }

    let resolved = employees.len();
    let stored = store.replace_employees(employees).await?;
    if stored < resolved {
        warn!(
            "{} employee rows had a zero count or were overridden by a later row",
            resolved - stored
        );
    }

    // Only rows that ended up as a stored record count as imported
    Ok(SheetSummary {
        imported: stored,
        skipped: total - stored,
    })
}

/// Applies a parsed workbook to the store.
///
/// Project and hotel rows are appended to the provinces they name. An employees sheet,
/// if present, replaces the whole employee collection; provinces it does not list lose
/// their headcount.
///
/// # Errors
/// Returns an error only when the store cannot persist a change. Invalid rows are
/// reported through the summary instead.
#[instrument(skip_all)]
pub async fn import_workbook(store: &mut AtlasStore, workbook: Workbook) -> Result<ImportSummary> {
    info!("Starting workbook import");
    let mut summary = ImportSummary::default();

    if let Some(rows) = workbook.projects {
        summary.projects = Some(import_item_sheet(store, Category::Project, rows).await?);
    }
    if let Some(rows) = workbook.hotels {
        summary.hotels = Some(import_item_sheet(store, Category::Hotel, rows).await?);
    }
    if let Some(rows) = workbook.employees {
        summary.employees = Some(import_employee_sheet(store, rows).await?);
    }

    info!("Workbook import finished: {}", summary.message());
    Ok(summary)
}

/// Exports the store in the same sheet layout the importer reads.
#[must_use]
pub fn export_workbook(store: &AtlasStore) -> Workbook {
    let mut projects = Vec::new();
    let mut hotels = Vec::new();

    for flat in store.flat_items() {
        let row = ItemRow {
            province: flat.province_name().to_string(),
            name: flat.item.name.clone(),
            type_name: flat.item.type_name.clone(),
            latitude: Some(flat.item.coordinates.latitude),
            longitude: Some(flat.item.coordinates.longitude),
            is_active: Some(flat.item.is_active),
            fields: flat.item.fields.clone(),
        };
        match flat.item.category {
            Category::Project => projects.push(row),
            Category::Hotel => hotels.push(row),
        }
    }

    let employees = store
        .employees()
        .iter()
        .map(|employee| EmployeeRow {
            province: employee.province_name.clone(),
            employee_count: employee.employee_count,
        })
        .collect();

    Workbook {
        projects: Some(projects),
        hotels: Some(hotels),
        employees: Some(employees),
    }
}
