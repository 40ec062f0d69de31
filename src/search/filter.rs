use super::types::{Requirement, SearchFilters};
use crate::models::{Amenity, Classification, Property};

/// True when `property` satisfies every predicate in `filters`
pub fn matches(property: &Property, filters: &SearchFilters) -> bool {
    matches_classification(property, filters)
        && matches_text(property, filters)
        && matches_specs(property, filters)
        && filters.price.contains(property.price)
        && matches_amenities(property, filters)
        && matches_tri_states(property, filters)
}

fn matches_classification(property: &Property, filters: &SearchFilters) -> bool {
    if let Some(wanted) = filters.property_type {
        if property.property_type != wanted {
            return false;
        }
    }
    match &filters.category {
        Some(category) => property.category.trim().to_lowercase() == *category,
        None => true,
    }
}

fn matches_text(property: &Property, filters: &SearchFilters) -> bool {
    if let Some(needle) = &filters.location {
        let hit = [&property.location, &property.city, &property.address]
            .into_iter()
            .any(|field| contains_ignore_case(field, needle));
        if !hit {
            return false;
        }
    }
    if let Some(needle) = &filters.keywords {
        let hit = property
            .keywords
            .iter()
            .any(|keyword| contains_ignore_case(keyword, needle))
            || contains_ignore_case(&property.description, needle);
        if !hit {
            return false;
        }
    }
    true
}

fn matches_specs(property: &Property, filters: &SearchFilters) -> bool {
    filters.min_bedrooms.map_or(true, |min| property.bedrooms >= min)
        && filters.min_bathrooms.map_or(true, |min| property.bathrooms >= min)
}

fn matches_amenities(property: &Property, filters: &SearchFilters) -> bool {
    Amenity::ALL.into_iter().all(|amenity| match filters.requirement(amenity) {
        Requirement::Unset => true,
        Requirement::MustBeTrue => property.amenities.has(amenity),
    })
}

fn matches_tri_states(property: &Property, filters: &SearchFilters) -> bool {
    Classification::ALL.into_iter().all(|classification| {
        filters
            .tri_state(classification)
            .admits(property.classifications.is(classification))
    })
}

/// `needle` is expected to be lowercased already
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amenities, Classifications, PropertyType};
    use crate::search::types::TriState;
    use chrono::{TimeZone, Utc};

    fn flat() -> Property {
        Property {
            id: 1,
            title: "Two bedroom flat".to_string(),
            description: "Bright flat close to the Waterfront".to_string(),
            keywords: vec!["Sea View".to_string(), "quiet".to_string()],
            property_type: PropertyType::Rent,
            category: "Apartment".to_string(),
            location: "Victoria Island".to_string(),
            city: "Lagos".to_string(),
            state: "Lagos".to_string(),
            address: "12 Ahmadu Bello Way".to_string(),
            price: 150_000.0,
            currency: "NGN".to_string(),
            featured: false,
            date_added: Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap(),
            bedrooms: 2,
            bathrooms: 1,
            amenities: Amenities {
                parking: true,
                ..Default::default()
            },
            classifications: Classifications {
                is_new_build: true,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_empty_filters_match_everything() {
        assert!(matches(&flat(), &SearchFilters::default()));
    }

    #[test]
    fn test_category_is_case_insensitive() {
        assert!(matches(&flat(), &SearchFilters::new().category(" apartment ")));
        assert!(!matches(&flat(), &SearchFilters::new().category("duplex")));
        assert!(matches(&flat(), &SearchFilters::new().category("all")));
    }

    #[test]
    fn test_location_matches_any_address_field() {
        assert!(matches(&flat(), &SearchFilters::new().location("victoria")));
        assert!(matches(&flat(), &SearchFilters::new().location("LAGOS")));
        assert!(matches(&flat(), &SearchFilters::new().location("bello way")));
        assert!(!matches(&flat(), &SearchFilters::new().location("Abuja")));
    }

    #[test]
    fn test_keywords_match_keyword_list_or_description() {
        assert!(matches(&flat(), &SearchFilters::new().keywords("sea view")));
        assert!(matches(&flat(), &SearchFilters::new().keywords("waterfront")));
        assert!(!matches(&flat(), &SearchFilters::new().keywords("pool")));
    }

    #[test]
    fn test_bedroom_minimum() {
        assert!(matches(&flat(), &SearchFilters::new().min_bedrooms(2)));
        assert!(!matches(&flat(), &SearchFilters::new().min_bedrooms(3)));
        assert!(!matches(&flat(), &SearchFilters::new().min_bathrooms(2)));
    }

    #[test]
    fn test_amenity_requirement_is_not_strict_equality() {
        assert!(matches(&flat(), &SearchFilters::new().require(Amenity::Parking)));
        assert!(!matches(&flat(), &SearchFilters::new().require(Amenity::Pool)));

        let mut filters = SearchFilters::new();
        filters.amenities.insert(Amenity::Parking, Requirement::from(Some(false)));
        assert!(matches(&flat(), &filters));
    }

    #[test]
    fn test_tri_state_classification() {
        let exclude =
            SearchFilters::new().classification(Classification::NewBuild, TriState::Exclude);
        let only = SearchFilters::new().classification(Classification::NewBuild, TriState::Only);
        let only_auction =
            SearchFilters::new().classification(Classification::Auction, TriState::Only);

        assert!(!matches(&flat(), &exclude));
        assert!(matches(&flat(), &only));
        assert!(!matches(&flat(), &only_auction));
    }

    #[test]
    fn test_inverted_price_range_matches_nothing() {
        let filters = SearchFilters::new().price_min(200_000.0).price_max(100_000.0);
        assert!(!matches(&flat(), &filters));
    }
}
