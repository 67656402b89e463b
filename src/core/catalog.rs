use crate::core::{Catalog, Resource};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::validate_unique_ids;

/// 啟動時建立、之後只讀的資源目錄
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    resources: Vec<Resource>,
}

impl InMemoryCatalog {
    pub fn new(resources: Vec<Resource>) -> Result<Self> {
        validate_unique_ids(resources.iter().map(|r| r.id.as_str()))?;
        tracing::debug!("Catalog seeded with {} resources", resources.len());
        Ok(Self { resources })
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl Catalog for InMemoryCatalog {
    fn get(&self, id: &str) -> Result<Resource> {
        self.resources
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| BookingError::ResourceNotFound { id: id.to_string() })
    }

    fn list(&self) -> Vec<Resource> {
        self.resources.clone()
    }
}
