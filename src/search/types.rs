use crate::error::SearchError;
use crate::models::{Amenity, Classification, Property, PropertyType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Page size used when the caller does not ask for one
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Largest page size accepted unless configured otherwise
pub const MAX_PAGE_SIZE: u32 = 100;

/// Sort order of search results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Featured listings first, otherwise catalog order
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    Newest,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Featured => "featured",
            SortBy::PriceLow => "price-low",
            SortBy::PriceHigh => "price-high",
            SortBy::Newest => "newest",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "featured" => Ok(SortBy::Featured),
            "price-low" => Ok(SortBy::PriceLow),
            "price-high" => Ok(SortBy::PriceHigh),
            "newest" => Ok(SortBy::Newest),
            other => Err(SearchError::UnknownSortKey(other.to_string())),
        }
    }
}

/// Amenity filter state. `false` from a caller means "don't care", never "must be false".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Requirement {
    #[default]
    Unset,
    MustBeTrue,
}

impl From<Option<bool>> for Requirement {
    fn from(requested: Option<bool>) -> Self {
        match requested {
            Some(true) => Requirement::MustBeTrue,
            _ => Requirement::Unset,
        }
    }
}

/// Include everything, drop flagged listings, or keep only flagged listings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriState {
    #[default]
    Include,
    Exclude,
    #[serde(alias = "show-only")]
    Only,
}

impl TriState {
    pub fn admits(&self, flagged: bool) -> bool {
        match self {
            TriState::Include => true,
            TriState::Exclude => !flagged,
            TriState::Only => flagged,
        }
    }

    /// Parse a query value, `field` names the parameter for error reporting
    pub fn parse(field: &'static str, value: &str) -> Result<Self, SearchError> {
        match value.trim().to_lowercase().as_str() {
            "" | "include" => Ok(TriState::Include),
            "exclude" => Ok(TriState::Exclude),
            "only" | "show-only" => Ok(TriState::Only),
            other => Err(SearchError::UnknownTriState {
                field,
                value: other.to_string(),
            }),
        }
    }
}

/// Inclusive price bounds; `None` is unbounded on that side
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        self.min.map_or(true, |min| price >= min) && self.max.map_or(true, |max| price <= max)
    }
}

/// Typed, normalized search filters. Build one from a [`SearchQuery`](super::SearchQuery)
/// when the input comes from outside the process.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchFilters {
    pub property_type: Option<PropertyType>,
    /// Lowercased, trimmed category
    pub category: Option<String>,
    /// Lowercased, trimmed substring matched against location, city and address
    pub location: Option<String>,
    /// Lowercased, trimmed substring matched against keywords and description
    pub keywords: Option<String>,
    pub min_bedrooms: Option<u32>,
    pub min_bathrooms: Option<u32>,
    pub price: PriceRange,
    pub amenities: BTreeMap<Amenity, Requirement>,
    pub classifications: BTreeMap<Classification, TriState>,
    pub sort_by: SortBy,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = Some(property_type);
        self
    }

    /// `"all"` and blank values clear the filter
    pub fn category(mut self, category: &str) -> Self {
        self.category = normalize_choice(category);
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.location = normalize_text(location);
        self
    }

    pub fn keywords(mut self, keywords: &str) -> Self {
        self.keywords = normalize_text(keywords);
        self
    }

    /// A minimum of 0 is indistinguishable from "not set"
    pub fn min_bedrooms(mut self, bedrooms: u32) -> Self {
        self.min_bedrooms = (bedrooms > 0).then_some(bedrooms);
        self
    }

    pub fn min_bathrooms(mut self, bathrooms: u32) -> Self {
        self.min_bathrooms = (bathrooms > 0).then_some(bathrooms);
        self
    }

    pub fn price_min(mut self, min: f64) -> Self {
        self.price.min = Some(min);
        self
    }

    pub fn price_max(mut self, max: f64) -> Self {
        self.price.max = Some(max);
        self
    }

    pub fn require(mut self, amenity: Amenity) -> Self {
        self.amenities.insert(amenity, Requirement::MustBeTrue);
        self
    }

    pub fn classification(mut self, classification: Classification, state: TriState) -> Self {
        self.classifications.insert(classification, state);
        self
    }

    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn requirement(&self, amenity: Amenity) -> Requirement {
        self.amenities.get(&amenity).copied().unwrap_or_default()
    }

    pub fn tri_state(&self, classification: Classification) -> TriState {
        self.classifications
            .get(&classification)
            .copied()
            .unwrap_or_default()
    }
}

/// 1-based page request, validated on construction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Result<Self, SearchError> {
        Self::bounded(page, page_size, MAX_PAGE_SIZE)
    }

    /// Like [`PageRequest::new`] with a caller-chosen page size ceiling
    pub fn bounded(page: u32, page_size: u32, max_page_size: u32) -> Result<Self, SearchError> {
        if page == 0 {
            return Err(SearchError::InvalidPage(page));
        }
        if page_size == 0 || page_size > max_page_size {
            return Err(SearchError::InvalidPageSize {
                got: page_size,
                max: max_page_size,
            });
        }
        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Index of the first item on this page
    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.page_size as usize)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of matches plus the total number of matches before paging
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySearchResult {
    pub properties: Vec<Property>,
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
}

impl PropertySearchResult {
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size as usize)
    }
}

pub(crate) fn normalize_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

pub(crate) fn normalize_choice(value: &str) -> Option<String> {
    normalize_text(value).filter(|v| v != "all")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_filters_default() {
        let filters = SearchFilters::default();
        assert!(filters.property_type.is_none());
        assert_eq!(filters.sort_by, SortBy::Featured);
        assert_eq!(filters.requirement(Amenity::Pool), Requirement::Unset);
        assert_eq!(filters.tri_state(Classification::Auction), TriState::Include);
    }

    #[test]
    fn test_requirement_from_optional_bool() {
        assert_eq!(Requirement::from(Some(true)), Requirement::MustBeTrue);
        assert_eq!(Requirement::from(Some(false)), Requirement::Unset);
        assert_eq!(Requirement::from(None), Requirement::Unset);
    }

    #[test]
    fn test_tri_state_parse_accepts_show_only() {
        assert_eq!(TriState::parse("auctions", "show-only"), Ok(TriState::Only));
        assert_eq!(TriState::parse("auctions", " Exclude "), Ok(TriState::Exclude));
        assert_eq!(TriState::parse("auctions", ""), Ok(TriState::Include));
        assert!(TriState::parse("auctions", "maybe").is_err());
    }

    #[test]
    fn test_sort_by_parse_and_display() {
        assert_eq!("price-high".parse::<SortBy>(), Ok(SortBy::PriceHigh));
        assert_eq!(SortBy::Newest.to_string(), "newest");
        assert!("cheapest".parse::<SortBy>().is_err());
    }

    #[test]
    fn test_builder_normalizes_text_and_zero_minimums() {
        let filters = SearchFilters::new()
            .category("  ALL ")
            .location("  Lekki ")
            .keywords("   ")
            .min_bedrooms(0)
            .min_bathrooms(2);

        assert_eq!(filters.category, None);
        assert_eq!(filters.location.as_deref(), Some("lekki"));
        assert_eq!(filters.keywords, None);
        assert_eq!(filters.min_bedrooms, None);
        assert_eq!(filters.min_bathrooms, Some(2));
    }

    #[test]
    fn test_page_request_validation() {
        assert_eq!(PageRequest::new(0, 12), Err(SearchError::InvalidPage(0)));
        assert!(PageRequest::new(1, 0).is_err());
        assert!(PageRequest::new(1, MAX_PAGE_SIZE + 1).is_err());
        assert!(PageRequest::bounded(1, 20, 10).is_err());

        let page = PageRequest::new(3, 12).unwrap();
        assert_eq!(page.offset(), 24);
        assert_eq!(PageRequest::default().page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_price_range_bounds_are_inclusive() {
        let range = PriceRange {
            min: Some(100.0),
            max: Some(200.0),
        };
        assert!(range.contains(100.0));
        assert!(range.contains(200.0));
        assert!(!range.contains(99.99));
        assert!(PriceRange::default().contains(f64::MAX));
    }
}
