//! Index label business logic.
//!
//! Indexes are the reusable metric labels offered for general province info. The set is
//! unique and never empty.

use crate::{
    core::store::AtlasStore,
    errors::{Error, Result},
};
use tracing::{info, instrument};

impl AtlasStore {
    /// All index labels in insertion order.
    #[must_use]
    pub fn indexes(&self) -> &[String] {
        &self.indexes.indexes
    }

    /// Adds a label. Surrounding whitespace is trimmed before the duplicate check.
    #[instrument(skip(self))]
    pub async fn add_index(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName { entity: "Index" });
        }
        if self.indexes.indexes.iter().any(|existing| existing == name) {
            return Err(Error::DuplicateIndex {
                name: name.to_string(),
            });
        }

        let mut next = self.indexes.clone();
        next.indexes.push(name.to_string());
        self.commit_indexes(next).await?;
        info!("Added index {}", name);
        Ok(())
    }

    /// Removes a label, refusing to remove the last one.
    #[instrument(skip(self))]
    pub async fn remove_index(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        let position = self
            .indexes
            .indexes
            .iter()
            .position(|existing| existing == name)
            .ok_or_else(|| Error::IndexNotFound {
                name: name.to_string(),
            })?;
        if self.indexes.indexes.len() == 1 {
            return Err(Error::LastIndex {
                name: name.to_string(),
            });
        }

        let mut next = self.indexes.clone();
        next.indexes.remove(position);
        self.commit_indexes(next).await?;
        info!("Removed index {}", name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::Catalog;
    use crate::test_utils::*;

    fn single_index_catalog() -> Catalog {
        Catalog {
            default_indexes: vec!["population".to_string()],
            ..Catalog::default()
        }
    }

    #[tokio::test]
    async fn test_add_index() -> Result<()> {
        let mut store = setup_test_store_with(single_index_catalog()).await?;
        store.add_index("  area ").await?;
        assert_eq!(store.indexes(), &["population", "area"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_index_rejected() -> Result<()> {
        let mut store = setup_test_store_with(single_index_catalog()).await?;
        let result = store.add_index("population").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::DuplicateIndex { name } if name == "population"
        ));
        assert_eq!(store.indexes().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_index_rejected() -> Result<()> {
        let mut store = setup_test_store_with(single_index_catalog()).await?;
        let result = store.add_index("   ").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::EmptyName { entity: "Index" }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_last_index_cannot_be_removed() -> Result<()> {
        let mut store = setup_test_store_with(single_index_catalog()).await?;
        let result = store.remove_index("population").await;
        assert!(matches!(result.unwrap_err(), Error::LastIndex { .. }));
        assert_eq!(store.indexes(), &["population"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_index() -> Result<()> {
        let mut store = setup_test_store_with(single_index_catalog()).await?;
        store.add_index("area").await?;

        store.remove_index("population").await?;
        assert_eq!(store.indexes(), &["area"]);

        let missing = store.remove_index("population").await;
        assert!(matches!(missing.unwrap_err(), Error::IndexNotFound { .. }));
        Ok(())
    }
}
