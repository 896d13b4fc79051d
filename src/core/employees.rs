//! Employee headcount business logic.
//!
//! The collection holds at most one record per province and never a zero count: setting
//! a province's count to zero removes its record. Spreadsheet imports replace the whole
//! collection through [`AtlasStore::replace_employees`], which is deliberately distinct
//! from the per-province upsert.

use crate::{
    core::{storage::EmployeeState, store::AtlasStore},
    errors::{Error, Result},
    models::Employee,
};
use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

/// Outcome of [`AtlasStore::add_or_update_employees`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeChange {
    /// The record was created or its count changed
    Upserted(Employee),
    /// A zero count removed the existing record
    Removed(Employee),
    /// A zero count was set for a province without a record
    Unchanged,
}

impl AtlasStore {
    /// All employee records in insertion order.
    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.employees.employees
    }

    /// The record for a province, if it has a non-zero count.
    #[must_use]
    pub fn employee(&self, province_id: u32) -> Option<&Employee> {
        self.employees
            .employees
            .iter()
            .find(|employee| employee.province_id == province_id)
    }

    /// Sum of all recorded headcounts.
    #[must_use]
    pub fn total_employees(&self) -> u64 {
        crate::core::stats::total_employees(&self.employees.employees)
    }

    /// When the collection was last replaced by a spreadsheet import.
    #[must_use]
    pub const fn last_excel_import(&self) -> Option<DateTime<Utc>> {
        self.employees.last_excel_import
    }

    /// Creates, updates or (for a zero count) removes a province's headcount.
    ///
    /// Removing a record that does not exist is reported as
    /// [`EmployeeChange::Unchanged`] and does not touch storage.
    #[instrument(skip(self))]
    pub async fn add_or_update_employees(
        &mut self,
        province_id: u32,
        province_name: &str,
        employee_count: u32,
    ) -> Result<EmployeeChange> {
        let position = self
            .employees
            .employees
            .iter()
            .position(|employee| employee.province_id == province_id);

        if employee_count == 0 {
            let Some(position) = position else {
                return Ok(EmployeeChange::Unchanged);
            };
            let mut next = self.employees.clone();
            let removed = next.employees.remove(position);
            self.commit_employees(next).await?;
            info!("Removed employee record for province {}", province_id);
            return Ok(EmployeeChange::Removed(removed));
        }

        let province_name = province_name.trim();
        if province_name.is_empty() {
            return Err(Error::EmptyName { entity: "Province" });
        }

        let record = Employee::new(province_id, province_name, employee_count);
        let mut next = self.employees.clone();
        match position {
            Some(position) => next.employees[position] = record.clone(),
            None => next.employees.push(record.clone()),
        }

        self.commit_employees(next).await?;
        info!(
            "Set {} employees for province {}",
            employee_count, province_id
        );
        Ok(EmployeeChange::Upserted(record))
    }

    /// Replaces the entire collection with `employees` and stamps the import time.
    ///
    /// Provinces absent from `employees` lose their records. Zero-count rows are
    /// dropped, rows with a blank province name are skipped, and a later row for the
    /// same province overrides an earlier one.
    ///
    /// # Returns
    /// The number of records stored.
    #[instrument(skip_all, fields(rows = employees.len()))]
    pub async fn replace_employees(&mut self, employees: Vec<Employee>) -> Result<usize> {
        let mut records: Vec<Employee> = Vec::with_capacity(employees.len());
        for mut employee in employees {
            let province_name = employee.province_name.trim();
            if province_name.is_empty() {
                warn!(
                    "Skipping employee record for province {}: empty name",
                    employee.province_id
                );
                continue;
            }
            employee.province_name = province_name.to_string();

            let position = records
                .iter()
                .position(|existing| existing.province_id == employee.province_id);
            match (position, employee.employee_count) {
                (Some(position), 0) => {
                    records.remove(position);
                }
                (None, 0) => {}
                (Some(position), _) => records[position] = employee,
                (None, _) => records.push(employee),
            }
        }

        let stored = records.len();
        let next = EmployeeState {
            employees: records,
            last_excel_import: Some(Utc::now()),
        };
        self.commit_employees(next).await?;
        info!("Replaced employee collection with {} records", stored);
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_upsert_creates_then_updates() -> Result<()> {
        let mut store = setup_test_store().await?;

        let created = store.add_or_update_employees(1, "Tehran", 10).await?;
        assert_eq!(
            created,
            EmployeeChange::Upserted(Employee::new(1, "Tehran", 10))
        );

        store.add_or_update_employees(1, "Tehran", 12).await?;
        assert_eq!(store.employees().len(), 1);
        assert_eq!(store.employee(1).unwrap().employee_count, 12);
        Ok(())
    }

    #[tokio::test]
    async fn test_zero_count_removes_record() -> Result<()> {
        let mut store = setup_test_store().await?;
        store.add_or_update_employees(5, "X", 7).await?;
        store.add_or_update_employees(6, "Y", 3).await?;

        let change = store.add_or_update_employees(5, "X", 0).await?;
        assert_eq!(change, EmployeeChange::Removed(Employee::new(5, "X", 7)));
        assert!(store.employee(5).is_none());
        assert_eq!(store.total_employees(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_zero_count_without_record_is_unchanged() -> Result<()> {
        let mut store = setup_test_store().await?;
        let change = store.add_or_update_employees(5, "X", 0).await?;
        assert_eq!(change, EmployeeChange::Unchanged);
        assert_eq!(store.version(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_province_name_rejected() -> Result<()> {
        let mut store = setup_test_store().await?;
        let result = store.add_or_update_employees(5, "  ", 4).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::EmptyName { entity: "Province" }
        ));
        assert!(store.employees().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_replace_discards_unlisted_provinces() -> Result<()> {
        let mut store = setup_test_store().await?;
        store.add_or_update_employees(2, "Alborz", 40).await?;
        assert!(store.last_excel_import().is_none());

        let stored = store
            .replace_employees(vec![Employee::new(1, "Tehran", 10)])
            .await?;

        assert_eq!(stored, 1);
        assert!(store.employee(2).is_none());
        assert_eq!(store.total_employees(), 10);
        assert!(store.last_excel_import().is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_replace_keeps_invariants() -> Result<()> {
        let mut store = setup_test_store().await?;

        let stored = store
            .replace_employees(vec![
                Employee::new(1, "Tehran", 10),
                Employee::new(3, "Isfahan", 0),
                Employee::new(4, "Fars", 8),
                Employee::new(1, "Tehran", 15),
                Employee::new(4, "Fars", 0),
            ])
            .await?;

        assert_eq!(stored, 1);
        assert_eq!(store.employees(), &[Employee::new(1, "Tehran", 15)]);
        Ok(())
    }

    #[tokio::test]
    async fn test_replace_skips_blank_province_names() -> Result<()> {
        let mut store = setup_test_store().await?;

        let stored = store
            .replace_employees(vec![
                Employee::new(1, "  Tehran ", 10),
                Employee::new(2, "   ", 5),
                Employee::new(3, "", 7),
            ])
            .await?;

        assert_eq!(stored, 1);
        assert_eq!(store.employees(), &[Employee::new(1, "Tehran", 10)]);
        assert!(store.employee(2).is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_replace_with_empty_list_clears_collection() -> Result<()> {
        let mut store = setup_test_store().await?;
        store.add_or_update_employees(2, "Alborz", 40).await?;

        store.replace_employees(Vec::new()).await?;
        assert!(store.employees().is_empty());
        assert_eq!(store.total_employees(), 0);
        Ok(())
    }
}
