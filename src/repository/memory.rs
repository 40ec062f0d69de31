use super::traits::PropertyRepository;
use crate::error::{RepositoryError, Result};
use crate::models::{is_valid_price, ListingUpdate, NewListing, Property};
use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// In-memory catalog with copy-on-write snapshots.
///
/// Readers clone the inner `Arc`, so a search keeps iterating the catalog it
/// started with even if a listing is created meanwhile.
pub struct InMemoryRepository {
    catalog: RwLock<Arc<Vec<Property>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            catalog: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Build a repository from existing listings, rejecting duplicate ids
    pub fn with_catalog(properties: Vec<Property>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(properties.len());
        for property in &properties {
            if !seen.insert(property.id) {
                return Err(RepositoryError::DuplicateId(property.id));
            }
        }

        Ok(Self {
            catalog: RwLock::new(Arc::new(properties)),
        })
    }

    /// Load a catalog saved as a JSON array of listings
    pub async fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read catalog file '{}'", path.display()))?;
        let properties: Vec<Property> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse catalog file '{}'", path.display()))?;

        info!("📂 Loaded {} listings from {}", properties.len(), path.display());

        Ok(Self::with_catalog(properties)?)
    }
}

#[async_trait]
impl PropertyRepository for InMemoryRepository {
    async fn snapshot(&self) -> Result<Arc<Vec<Property>>> {
        Ok(self.catalog.read().await.clone())
    }

    async fn get(&self, id: u64) -> Result<Option<Property>> {
        let catalog = self.catalog.read().await;
        Ok(catalog.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, listing: NewListing) -> Result<Property> {
        if listing.title.trim().is_empty() {
            return Err(RepositoryError::InvalidListing("title is required".to_string()));
        }
        if !is_valid_price(listing.price) {
            return Err(RepositoryError::InvalidListing(format!(
                "price must be a non-negative number, got {}",
                listing.price
            )));
        }

        let mut catalog = self.catalog.write().await;
        let last = catalog.iter().map(|p| p.id).max().unwrap_or(0);
        let id = last
            .checked_add(1)
            .ok_or(RepositoryError::IdsExhausted(last))?;
        let property = listing.into_property(id, Utc::now());
        Arc::make_mut(&mut *catalog).push(property.clone());

        debug!("Created listing: {} with id {}", property.title, id);
        Ok(property)
    }

    async fn update(&self, id: u64, update: ListingUpdate) -> Result<Option<Property>> {
        if let Some(price) = update.price {
            if !is_valid_price(price) {
                return Err(RepositoryError::InvalidListing(format!(
                    "price must be a non-negative number, got {}",
                    price
                )));
            }
        }

        let mut catalog = self.catalog.write().await;
        let Some(index) = catalog.iter().position(|p| p.id == id) else {
            return Ok(None);
        };

        let properties = Arc::make_mut(&mut *catalog);
        update.apply(&mut properties[index]);

        debug!("Updated listing {}", id);
        Ok(Some(properties[index].clone()))
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.catalog.read().await.len())
    }
}
