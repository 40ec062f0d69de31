//! Property catalog search: filter, sort and paginate listings, served over HTTP.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod repository;
pub mod search;
pub mod server;

pub use error::{RepositoryError, SearchError};
pub use models::{Property, PropertyType};
pub use repository::{InMemoryRepository, PropertyRepository};
pub use search::{search, PageRequest, PropertySearchResult, SearchFilters, SearchQuery, SortBy};
