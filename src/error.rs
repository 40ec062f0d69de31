use thiserror::Error;

/// Rejected search input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("page must be 1 or greater, got {0}")]
    InvalidPage(u32),

    #[error("page size must be between 1 and {max}, got {got}")]
    InvalidPageSize { got: u32, max: u32 },

    #[error("invalid {bound} price: {value}")]
    InvalidPrice { bound: &'static str, value: f64 },

    #[error("unknown property type: {0}")]
    UnknownPropertyType(String),

    #[error("unknown tri-state value for {field}: {value}")]
    UnknownTriState { field: &'static str, value: String },

    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),
}

/// Catalog storage failures
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("duplicate property id: {0}")]
    DuplicateId(u64),

    #[error("invalid listing: {0}")]
    InvalidListing(String),

    #[error("no property ids left after {0}")]
    IdsExhausted(u64),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
