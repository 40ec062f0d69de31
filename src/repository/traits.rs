use crate::error::Result;
use crate::models::{ListingUpdate, NewListing, Property};
use async_trait::async_trait;
use std::sync::Arc;

/// Common trait for property catalog storage.
/// Search only ever reads a snapshot, so any backend that can hand one out will do.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Consistent read-only view of the whole catalog
    async fn snapshot(&self) -> Result<Arc<Vec<Property>>>;

    /// Look up one listing; a missing id is `None`, not an error
    async fn get(&self, id: u64) -> Result<Option<Property>>;

    /// Add a listing and return it with its assigned id
    async fn create(&self, listing: NewListing) -> Result<Property>;

    /// Apply price/status edits; `None` when the id does not exist
    async fn update(&self, id: u64, update: ListingUpdate) -> Result<Option<Property>>;

    async fn len(&self) -> Result<usize>;

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}
