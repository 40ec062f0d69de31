//! Property search: narrow the catalog with [`SearchFilters`], order it by
//! [`SortBy`], then cut out the requested page.
//!
//! [`search`] is a pure function over a catalog slice. [`search_repository`]
//! runs it against a snapshot taken from a [`PropertyRepository`].

pub mod filter;
pub mod query;
pub mod types;

pub use filter::matches;
pub use query::{SearchQuery, UNBOUNDED_PRICE_MAX};
pub use types::{
    PageRequest, PriceRange, PropertySearchResult, Requirement, SearchFilters, SortBy, TriState,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};

use crate::error::Result;
use crate::models::Property;
use crate::repository::PropertyRepository;
use std::cmp::Ordering;
use tracing::debug;

/// Filter, sort and paginate `catalog`. `total` counts every match, not just the returned page.
pub fn search(
    catalog: &[Property],
    filters: &SearchFilters,
    page: PageRequest,
) -> PropertySearchResult {
    let mut matched: Vec<&Property> = catalog
        .iter()
        .filter(|property| matches(property, filters))
        .collect();

    sort(&mut matched, filters.sort_by);

    let total = matched.len();
    let properties = matched
        .into_iter()
        .skip(page.offset())
        .take(page.page_size() as usize)
        .cloned()
        .collect();

    PropertySearchResult {
        properties,
        total,
        page: page.page(),
        page_size: page.page_size(),
    }
}

/// Stable sort; ties keep catalog order
fn sort(properties: &mut [&Property], sort_by: SortBy) {
    let compare: fn(&&Property, &&Property) -> Ordering = match sort_by {
        SortBy::Featured => |a, b| b.featured.cmp(&a.featured),
        SortBy::PriceLow => |a, b| a.price.total_cmp(&b.price),
        SortBy::PriceHigh => |a, b| b.price.total_cmp(&a.price),
        SortBy::Newest => |a, b| b.date_added.cmp(&a.date_added),
    };
    properties.sort_by(compare);
}

/// Run [`search`] against a snapshot of `repository`
pub async fn search_repository(
    repository: &dyn PropertyRepository,
    filters: &SearchFilters,
    page: PageRequest,
) -> Result<PropertySearchResult> {
    let catalog = repository.snapshot().await?;
    let result = search(&catalog, filters, page);

    debug!(
        "Search over {} listings matched {} (page {}, {} returned, sort {})",
        catalog.len(),
        result.total,
        result.page,
        result.properties.len(),
        filters.sort_by
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::sample_catalog;

    #[test]
    fn test_featured_sort_partitions_and_keeps_order() {
        let catalog = sample_catalog();
        let result = search(&catalog, &SearchFilters::default(), PageRequest::new(1, 100).unwrap());

        let first_plain = result
            .properties
            .iter()
            .position(|p| !p.featured)
            .unwrap_or(result.properties.len());
        assert!(result.properties[first_plain..].iter().all(|p| !p.featured));

        let featured_ids: Vec<u64> = result.properties[..first_plain].iter().map(|p| p.id).collect();
        let mut sorted = featured_ids.clone();
        sorted.sort();
        assert_eq!(featured_ids, sorted);
    }

    #[test]
    fn test_newest_sort_is_descending() {
        let catalog = sample_catalog();
        let filters = SearchFilters::new().sort_by(SortBy::Newest);
        let result = search(&catalog, &filters, PageRequest::new(1, 100).unwrap());

        assert!(result
            .properties
            .windows(2)
            .all(|pair| pair[0].date_added >= pair[1].date_added));
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let catalog = sample_catalog();
        let result = search(&catalog, &SearchFilters::default(), PageRequest::new(50, 12).unwrap());

        assert!(result.properties.is_empty());
        assert_eq!(result.total, catalog.len());
        assert_eq!(result.page, 50);
    }

    #[test]
    fn test_empty_catalog() {
        let result = search(&[], &SearchFilters::default(), PageRequest::default());
        assert_eq!(result.total, 0);
        assert!(result.properties.is_empty());
        assert_eq!(result.total_pages(), 0);
    }
}
